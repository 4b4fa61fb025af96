use crate::models::Symptom;

const REPLIES: &[(&[&str], &str)] = &[
    (
        &["fever"],
        "Fever can be caused by many things. Stay hydrated and rest. If it persists, consult a doctor.",
    ),
    (
        &["headache"],
        "Headaches are common. Try to rest and drink water. If severe, seek medical advice.",
    ),
    (
        &["appointment"],
        "You can book an appointment in the Book Appointment section.",
    ),
    (
        &["symptom"],
        "You can log your symptoms in the Log Symptom section.",
    ),
    (
        &["hello", "hi"],
        "Hello! How can I assist you with your health today?",
    ),
];

const FALLBACK_REPLY: &str =
    "I am here to help with general health questions. For emergencies, contact a healthcare professional.";

/// Canned chat reply; the first table entry with a keyword contained in the
/// lowercased message wins.
pub fn bot_reply(message: &str) -> &'static str {
    let message = message.to_lowercase();
    REPLIES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|keyword| message.contains(*keyword)))
        .map_or(FALLBACK_REPLY, |(_, reply)| *reply)
}

pub fn health_advice(symptom: &Symptom) -> &'static str {
    let label = symptom.symptom.to_lowercase();
    if symptom.severity >= 8 {
        "High severity. Please consider seeking medical attention."
    } else if label.contains("pain") {
        "Monitor your pain and rest. If it worsens, consult a doctor."
    } else if label.contains("fever") {
        "Stay hydrated and rest. If fever persists, see a doctor."
    } else {
        "Symptom logged. Take care and monitor your health."
    }
}
