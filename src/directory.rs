//! Read-only specialty to doctor reference table.

const DIRECTORY: &[(&str, &[&str])] = &[
    (
        "General Medicine",
        &["Dr. Michael Chen", "Dr. Lisa Rodriguez", "Dr. James Wilson"],
    ),
    (
        "Cardiology",
        &["Dr. Sarah Johnson", "Dr. Robert Kim", "Dr. Maria Santos"],
    ),
    ("Dermatology", &["Dr. Emily Davis", "Dr. Andrew Brown"]),
    ("Neurology", &["Dr. David Martinez", "Dr. Jennifer Lee"]),
    ("Orthopedics", &["Dr. Thomas Anderson", "Dr. Rachel Green"]),
    ("Pediatrics", &["Dr. Nancy White", "Dr. Kevin Park"]),
];

/// Doctors for `specialty` in listing order; empty for unknown specialties.
pub fn doctors_by_specialty(specialty: &str) -> Vec<&'static str> {
    DIRECTORY
        .iter()
        .find(|(name, _)| *name == specialty)
        .map(|(_, doctors)| doctors.to_vec())
        .unwrap_or_default()
}

pub fn all_specialties() -> Vec<&'static str> {
    DIRECTORY.iter().map(|(name, _)| *name).collect()
}
