//! Derived views over the stores. Always recomputed from current contents.

use crate::models::{
    Appointment, AppointmentStatus, DashboardStats, HealthData, SummaryResponse, SymptomGroup,
};
use crate::store::{AppointmentStore, DEFAULT_UPCOMING_DAYS, SymptomStore};
use chrono::{Local, NaiveDate};
use std::collections::{BTreeMap, BTreeSet};

pub fn build_summary(data: &HealthData) -> SummaryResponse {
    build_summary_at(Local::now().date_naive(), data)
}

pub fn build_summary_at(today: NaiveDate, data: &HealthData) -> SummaryResponse {
    SummaryResponse {
        symptoms: symptom_summary(&data.symptoms),
        appointment_status: appointment_status_summary(&data.appointments),
        next_appointment: next_appointment(today, &data.appointments),
        dashboard: dashboard_stats(today, &data.symptoms, &data.appointments),
    }
}

/// Groups symptoms by label in first-appearance order.
///
/// `last_occurrence_date` is the date of the group's last-entered record,
/// not the chronologically latest date.
pub fn symptom_summary(symptoms: &SymptomStore) -> Vec<SymptomGroup> {
    struct Acc {
        count: u64,
        total_severity: u64,
        last_date: NaiveDate,
    }

    let mut order: Vec<&str> = Vec::new();
    let mut groups: BTreeMap<&str, Acc> = BTreeMap::new();

    for symptom in symptoms.all() {
        let acc = groups.entry(symptom.symptom.as_str()).or_insert_with(|| {
            order.push(symptom.symptom.as_str());
            Acc {
                count: 0,
                total_severity: 0,
                last_date: symptom.date,
            }
        });
        acc.count += 1;
        acc.total_severity += u64::from(symptom.severity);
        acc.last_date = symptom.date;
    }

    order
        .into_iter()
        .filter_map(|label| {
            let acc = groups.get(label)?;
            Some(SymptomGroup {
                symptom: label.to_string(),
                count: acc.count,
                average_severity: one_decimal(acc.total_severity as f64 / acc.count as f64),
                last_occurrence_date: acc.last_date,
            })
        })
        .collect()
}

pub fn appointment_status_summary(
    appointments: &AppointmentStore,
) -> BTreeMap<AppointmentStatus, u64> {
    let mut counts = BTreeMap::new();
    for appointment in appointments.all() {
        *counts.entry(appointment.status).or_insert(0) += 1;
    }
    counts
}

/// Earliest non-cancelled appointment dated today or tomorrow.
pub fn next_appointment(today: NaiveDate, appointments: &AppointmentStore) -> Option<Appointment> {
    appointments.upcoming(today, 1).into_iter().next()
}

pub fn dashboard_stats(
    today: NaiveDate,
    symptoms: &SymptomStore,
    appointments: &AppointmentStore,
) -> DashboardStats {
    let total = symptoms.len() as u64;
    let average_severity = if total == 0 {
        0.0
    } else {
        let sum: u64 = symptoms.all().iter().map(|s| u64::from(s.severity)).sum();
        one_decimal(sum as f64 / total as f64)
    };
    let days_tracked = symptoms
        .all()
        .iter()
        .map(|s| s.date)
        .collect::<BTreeSet<_>>()
        .len() as u64;

    DashboardStats {
        total_symptoms: total,
        average_severity,
        upcoming_appointments: appointments.upcoming(today, DEFAULT_UPCOMING_DAYS).len() as u64,
        days_tracked,
    }
}

fn one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
