use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::store::{AppointmentStore, SymptomStore};

/// Wall-clock time of day, minute precision. Serialized as `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }
}

impl From<NaiveTime> for ClockTime {
    fn from(time: NaiveTime) -> Self {
        Self(NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time))
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for ClockTime {
    type Err = chrono::ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        NaiveTime::parse_from_str(value, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
            .map(Self::from)
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Symptom {
    pub id: u64,
    pub symptom: String,
    pub severity: u8,
    pub duration: String,
    #[serde(default)]
    pub notes: String,
    pub date: NaiveDate,
    pub time: ClockTime,
}

/// Input for a new symptom log. Missing `date`/`time` fall back to the
/// moment the record is added.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewSymptom {
    pub symptom: String,
    pub severity: u8,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub notes: String,
    pub date: Option<NaiveDate>,
    pub time: Option<ClockTime>,
}

/// Fields left as `None` keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SymptomPatch {
    pub symptom: Option<String>,
    pub severity: Option<u8>,
    pub duration: Option<String>,
    pub notes: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<ClockTime>,
}

impl SymptomPatch {
    pub fn apply(self, target: &mut Symptom) {
        if let Some(symptom) = self.symptom {
            target.symptom = symptom;
        }
        if let Some(severity) = self.severity {
            target.severity = severity;
        }
        if let Some(duration) = self.duration {
            target.duration = duration;
        }
        if let Some(notes) = self.notes {
            target.notes = notes;
        }
        if let Some(date) = self.date {
            target.date = date;
        }
        if let Some(time) = self.time {
            target.time = time;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum AppointmentStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "Pending",
            AppointmentStatus::Confirmed => "Confirmed",
            AppointmentStatus::Cancelled => "Cancelled",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: u64,
    pub doctor: String,
    pub specialty: String,
    #[serde(default)]
    pub patient: String,
    pub date: NaiveDate,
    pub time: ClockTime,
    #[serde(default)]
    pub reason: String,
    pub status: AppointmentStatus,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewAppointment {
    pub doctor: String,
    pub specialty: String,
    #[serde(default)]
    pub patient: String,
    pub date: NaiveDate,
    pub time: ClockTime,
    #[serde(default)]
    pub reason: String,
    pub status: Option<AppointmentStatus>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppointmentPatch {
    pub doctor: Option<String>,
    pub specialty: Option<String>,
    pub patient: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<ClockTime>,
    pub reason: Option<String>,
    pub status: Option<AppointmentStatus>,
}

impl AppointmentPatch {
    pub fn apply(self, target: &mut Appointment) {
        if let Some(doctor) = self.doctor {
            target.doctor = doctor;
        }
        if let Some(specialty) = self.specialty {
            target.specialty = specialty;
        }
        if let Some(patient) = self.patient {
            target.patient = patient;
        }
        if let Some(date) = self.date {
            target.date = date;
        }
        if let Some(time) = self.time {
            target.time = time;
        }
        if let Some(reason) = self.reason {
            target.reason = reason;
        }
        if let Some(status) = self.status {
            target.status = status;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default = "default_notifications")]
    pub notifications: bool,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: DEFAULT_PROFILE_NAME.to_string(),
            email: String::new(),
            notifications: true,
        }
    }
}

pub const DEFAULT_PROFILE_NAME: &str = "User";

fn default_notifications() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default = "default_notifications")]
    pub notifications: bool,
}

impl Profile {
    pub fn update(&mut self, update: ProfileUpdate) {
        let name = update.name.trim();
        self.name = if name.is_empty() {
            DEFAULT_PROFILE_NAME.to_string()
        } else {
            name.to_string()
        };
        self.email = update.email.trim().to_string();
        self.notifications = update.notifications;
    }
}

/// Everything the application persists between runs.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HealthData {
    #[serde(default)]
    pub symptoms: SymptomStore,
    #[serde(default)]
    pub appointments: AppointmentStore,
    #[serde(default)]
    pub profile: Profile,
}

#[derive(Debug, Deserialize)]
pub struct DateRangeQuery {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct UpcomingQuery {
    pub days: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SymptomLogged {
    pub symptom: Symptom,
    pub advice: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymptomGroup {
    pub symptom: String,
    pub count: u64,
    pub average_severity: f64,
    pub last_occurrence_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_symptoms: u64,
    pub average_severity: f64,
    pub upcoming_appointments: u64,
    pub days_tracked: u64,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub symptoms: Vec<SymptomGroup>,
    pub appointment_status: BTreeMap<AppointmentStatus, u64>,
    pub next_appointment: Option<Appointment>,
    pub dashboard: DashboardStats,
}
