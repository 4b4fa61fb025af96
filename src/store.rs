//! Owned record collections for symptoms and appointments.
//!
//! Stores are plain values: every mutator takes `&mut self` and runs to
//! completion. Callers that share a store across tasks wrap it in a lock
//! (see [`crate::state::AppState`]). A missing id is reported as `None`.

use crate::models::{
    Appointment, AppointmentPatch, AppointmentStatus, NewAppointment, NewSymptom, Symptom,
    SymptomPatch,
};
use chrono::{Days, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

pub const DEFAULT_UPCOMING_DAYS: u32 = 30;

pub trait Record {
    fn id(&self) -> u64;
}

impl Record for Symptom {
    fn id(&self) -> u64 {
        self.id
    }
}

impl Record for Appointment {
    fn id(&self) -> u64 {
        self.id
    }
}

/// One past the largest id in `records`, or 1 when empty.
///
/// Ids freed by deleting the current maximum may be handed out again.
pub fn next_id<R: Record>(records: &[R]) -> u64 {
    records
        .iter()
        .map(Record::id)
        .max()
        .map_or(1, |max| max.saturating_add(1))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymptomStore {
    records: Vec<Symptom>,
}

impl SymptomStore {
    pub fn all(&self) -> &[Symptom] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn add(&mut self, data: NewSymptom, now: NaiveDateTime) -> Symptom {
        let symptom = Symptom {
            id: next_id(&self.records),
            symptom: data.symptom,
            severity: data.severity,
            duration: data.duration,
            notes: data.notes,
            date: data.date.unwrap_or(now.date()),
            time: data.time.unwrap_or_else(|| now.time().into()),
        };
        self.records.push(symptom.clone());
        symptom
    }

    pub fn update(&mut self, id: u64, patch: SymptomPatch) -> Option<Symptom> {
        let symptom = self.records.iter_mut().find(|symptom| symptom.id == id)?;
        patch.apply(symptom);
        Some(symptom.clone())
    }

    pub fn delete(&mut self, id: u64) -> Option<Symptom> {
        let index = self.records.iter().position(|symptom| symptom.id == id)?;
        Some(self.records.remove(index))
    }

    /// Records dated within `[start, end]`, in entry order.
    pub fn query_by_date_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<Symptom> {
        self.records
            .iter()
            .filter(|symptom| symptom.date >= start && symptom.date <= end)
            .cloned()
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppointmentStore {
    records: Vec<Appointment>,
}

impl AppointmentStore {
    pub fn all(&self) -> &[Appointment] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn add(&mut self, data: NewAppointment) -> Appointment {
        let appointment = Appointment {
            id: next_id(&self.records),
            doctor: data.doctor,
            specialty: data.specialty,
            patient: data.patient,
            date: data.date,
            time: data.time,
            reason: data.reason,
            status: data.status.unwrap_or_default(),
        };
        self.records.push(appointment.clone());
        appointment
    }

    pub fn update(&mut self, id: u64, patch: AppointmentPatch) -> Option<Appointment> {
        let appointment = self.records.iter_mut().find(|appointment| appointment.id == id)?;
        patch.apply(appointment);
        Some(appointment.clone())
    }

    /// Marks the appointment cancelled regardless of its current status.
    pub fn cancel(&mut self, id: u64) -> Option<Appointment> {
        let appointment = self.records.iter_mut().find(|appointment| appointment.id == id)?;
        appointment.status = AppointmentStatus::Cancelled;
        Some(appointment.clone())
    }

    /// Non-cancelled appointments dated from `today` through
    /// `today + window_days`, earliest first.
    pub fn upcoming(&self, today: NaiveDate, window_days: u32) -> Vec<Appointment> {
        let horizon = today
            .checked_add_days(Days::new(u64::from(window_days)))
            .unwrap_or(NaiveDate::MAX);

        let mut upcoming: Vec<Appointment> = self
            .records
            .iter()
            .filter(|appointment| {
                appointment.date >= today
                    && appointment.date <= horizon
                    && appointment.status != AppointmentStatus::Cancelled
            })
            .cloned()
            .collect();
        upcoming.sort_by_key(|appointment| appointment.date);
        upcoming
    }
}
