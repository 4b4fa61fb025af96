use crate::directory::all_specialties;
use crate::format::{format_date, format_time};
use crate::models::{AppointmentStatus, HealthData, SummaryResponse};

const PRESET_SYMPTOMS: &[&str] = &[
    "Headache",
    "Fever",
    "Cough",
    "Fatigue",
    "Nausea",
    "Back pain",
    "Sore throat",
];

pub fn render_index(data: &HealthData, summary: &SummaryResponse) -> String {
    let stats = &summary.dashboard;
    let profile = &data.profile;
    INDEX_HTML
        .replace("{{NAME}}", &escape_html(&profile.name))
        .replace("{{EMAIL}}", &escape_html(&profile.email))
        .replace(
            "{{NOTIFY}}",
            if profile.notifications { "checked" } else { "" },
        )
        .replace("{{TOTAL}}", &stats.total_symptoms.to_string())
        .replace("{{AVG}}", &format!("{:.1}", stats.average_severity))
        .replace("{{UPCOMING}}", &stats.upcoming_appointments.to_string())
        .replace("{{DAYS}}", &stats.days_tracked.to_string())
        .replace("{{SYMPTOM_OPTIONS}}", &symptom_options())
        .replace("{{SPECIALTY_OPTIONS}}", &specialty_options())
        .replace("{{SUMMARY_ROWS}}", &summary_rows(summary))
        .replace("{{STATUS_ROWS}}", &status_rows(summary))
        .replace("{{NEXT}}", &next_block(summary))
        .replace("{{SYMPTOM_ROWS}}", &symptom_rows(data))
        .replace("{{APPOINTMENT_ROWS}}", &appointment_rows(data))
}

fn symptom_options() -> String {
    PRESET_SYMPTOMS
        .iter()
        .chain(std::iter::once(&"Other"))
        .map(|label| format!(r#"<option value="{label}">{label}</option>"#))
        .collect()
}

fn specialty_options() -> String {
    all_specialties()
        .into_iter()
        .map(|name| format!(r#"<option value="{name}">{name}</option>"#))
        .collect()
}

/// Newest entry first.
fn symptom_rows(data: &HealthData) -> String {
    if data.symptoms.is_empty() {
        return r#"<tr><td colspan="6" class="empty">Nothing logged yet.</td></tr>"#.to_string();
    }
    data.symptoms
        .all()
        .iter()
        .rev()
        .map(|s| {
            format!(
                "<tr><td>{} {}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td>\
                 <td><button class=\"danger\" data-delete=\"{}\">Delete</button></td></tr>",
                format_date(s.date),
                format_time(s.time),
                escape_html(&s.symptom),
                s.severity,
                escape_html(&s.duration),
                escape_html(&s.notes),
                s.id
            )
        })
        .collect()
}

/// Newest booking first; cancelled rows lose their cancel button.
fn appointment_rows(data: &HealthData) -> String {
    if data.appointments.is_empty() {
        return r#"<tr><td colspan="7" class="empty">No appointments booked.</td></tr>"#
            .to_string();
    }
    data.appointments
        .all()
        .iter()
        .rev()
        .map(|a| {
            let action = if a.status == AppointmentStatus::Cancelled {
                String::new()
            } else {
                format!(r#"<button class="danger" data-cancel="{}">Cancel</button>"#, a.id)
            };
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{action}</td></tr>",
                escape_html(&a.doctor),
                escape_html(&a.specialty),
                format_date(a.date),
                format_time(a.time),
                escape_html(&a.reason),
                a.status.as_str()
            )
        })
        .collect()
}

fn summary_rows(summary: &SummaryResponse) -> String {
    if summary.symptoms.is_empty() {
        return r#"<tr><td colspan="4" class="empty">No symptoms recorded yet.</td></tr>"#
            .to_string();
    }
    summary
        .symptoms
        .iter()
        .map(|group| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{:.1}/10</td><td>{}</td></tr>",
                escape_html(&group.symptom),
                group.count,
                group.average_severity,
                format_date(group.last_occurrence_date)
            )
        })
        .collect()
}

fn status_rows(summary: &SummaryResponse) -> String {
    if summary.appointment_status.is_empty() {
        return r#"<li class="empty">No appointments scheduled yet.</li>"#.to_string();
    }
    summary
        .appointment_status
        .iter()
        .map(|(status, count)| {
            format!(
                "<li><span>{}</span><strong>{count}</strong></li>",
                status.as_str()
            )
        })
        .collect()
}

fn next_block(summary: &SummaryResponse) -> String {
    match &summary.next_appointment {
        Some(next) => format!(
            "<p><strong>{}</strong> ({})</p><p>{} at {}</p><p>{}</p>",
            escape_html(&next.doctor),
            escape_html(&next.specialty),
            format_date(next.date),
            format_time(next.time),
            escape_html(&next.reason)
        ),
        None => r#"<p class="empty">Nothing in the next day.</p>"#.to_string(),
    }
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            '{' => escaped.push_str("&#123;"),
            '}' => escaped.push_str("&#125;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Health Tracker</title>
  <style>
    :root {
      --bg: #eef4f2;
      --ink: #1f2d2b;
      --muted: #5e6e6b;
      --accent: #2a9d8f;
      --danger: #d1495b;
      --card: #ffffff;
      --shadow: 0 18px 40px rgba(31, 45, 43, 0.12);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(160deg, var(--bg), #f9fbfa 70%);
      color: var(--ink);
      font-family: "Segoe UI", "Trebuchet MS", sans-serif;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(960px, 100%);
      margin: 0 auto;
      display: grid;
      gap: 24px;
    }

    header h1 {
      margin: 0;
      font-size: clamp(1.8rem, 4vw, 2.4rem);
    }

    header p {
      margin: 4px 0 0;
      color: var(--muted);
    }

    .stats {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(160px, 1fr));
      gap: 16px;
    }

    .card {
      background: var(--card);
      border-radius: 18px;
      box-shadow: var(--shadow);
      padding: 20px;
    }

    .stat-value {
      font-size: 2rem;
      font-weight: 600;
      color: var(--accent);
    }

    .stat-label {
      color: var(--muted);
      font-size: 0.9rem;
    }

    table {
      width: 100%;
      border-collapse: collapse;
    }

    th, td {
      text-align: left;
      padding: 8px 6px;
      border-bottom: 1px solid #e3ebe9;
    }

    ul.status {
      list-style: none;
      margin: 0;
      padding: 0;
      display: grid;
      gap: 6px;
    }

    ul.status li {
      display: flex;
      justify-content: space-between;
    }

    .empty {
      color: var(--muted);
      font-style: italic;
    }

    form {
      display: grid;
      gap: 10px;
    }

    input, select, textarea, button {
      font: inherit;
      padding: 8px 10px;
      border-radius: 10px;
      border: 1px solid #cfdcd9;
    }

    button {
      background: var(--accent);
      color: #fff;
      border: none;
      cursor: pointer;
    }

    button.danger {
      background: var(--danger);
    }

    #chat-log {
      min-height: 120px;
      max-height: 260px;
      overflow-y: auto;
      display: grid;
      gap: 6px;
      margin-bottom: 10px;
    }

    #status {
      min-height: 1.2em;
      color: var(--muted);
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Welcome back, {{NAME}}</h1>
      <p>Track symptoms, manage appointments, and ask quick questions.</p>
      <p id="status"></p>
    </header>

    <section class="stats">
      <div class="card"><div class="stat-value">{{TOTAL}}</div><div class="stat-label">Symptoms logged</div></div>
      <div class="card"><div class="stat-value">{{AVG}}</div><div class="stat-label">Average severity</div></div>
      <div class="card"><div class="stat-value">{{UPCOMING}}</div><div class="stat-label">Upcoming appointments</div></div>
      <div class="card"><div class="stat-value">{{DAYS}}</div><div class="stat-label">Days tracked</div></div>
    </section>

    <section class="card">
      <h2>Symptom summary</h2>
      <table>
        <thead><tr><th>Symptom</th><th>Count</th><th>Average</th><th>Last</th></tr></thead>
        <tbody>{{SUMMARY_ROWS}}</tbody>
      </table>
    </section>

    <section class="stats">
      <div class="card">
        <h2>Appointment status</h2>
        <ul class="status">{{STATUS_ROWS}}</ul>
      </div>
      <div class="card">
        <h2>Next appointment</h2>
        {{NEXT}}
      </div>
    </section>

    <section class="card">
      <h2>Log a symptom</h2>
      <form id="symptom-form">
        <select name="symptom" id="symptom-select" required>{{SYMPTOM_OPTIONS}}</select>
        <input name="custom" id="custom-symptom" placeholder="Describe the symptom" hidden />
        <label>Severity <input name="severity" type="range" min="1" max="10" value="5" /></label>
        <input name="duration" placeholder="Duration (e.g. 2-4 hours)" />
        <textarea name="notes" placeholder="Notes"></textarea>
        <button type="submit">Log symptom</button>
      </form>
    </section>

    <section class="card">
      <h2>Symptom history</h2>
      <table>
        <thead><tr><th>Date</th><th>Symptom</th><th>Severity</th><th>Duration</th><th>Notes</th><th></th></tr></thead>
        <tbody>{{SYMPTOM_ROWS}}</tbody>
      </table>
    </section>

    <section class="card">
      <h2>Book an appointment</h2>
      <form id="appointment-form">
        <input name="patient" placeholder="Patient name" />
        <select name="specialty" id="specialty" required><option value="">Select a specialty...</option>{{SPECIALTY_OPTIONS}}</select>
        <select name="doctor" id="doctor" required><option value="">Select a doctor...</option></select>
        <input name="date" type="date" required />
        <input name="time" type="time" required />
        <input name="reason" placeholder="Reason for visit" />
        <button type="submit">Book</button>
      </form>
    </section>

    <section class="card">
      <h2>Appointments</h2>
      <table>
        <thead><tr><th>Doctor</th><th>Specialty</th><th>Date</th><th>Time</th><th>Reason</th><th>Status</th><th></th></tr></thead>
        <tbody>{{APPOINTMENT_ROWS}}</tbody>
      </table>
    </section>

    <section class="card">
      <h2>Ask MediBot</h2>
      <div id="chat-log"></div>
      <form id="chat-form">
        <input name="message" placeholder="Type a question..." autocomplete="off" />
        <button type="submit">Send</button>
      </form>
    </section>

    <section class="card">
      <h2>Profile</h2>
      <form id="profile-form">
        <input name="name" placeholder="Name" value="{{NAME}}" />
        <input name="email" type="email" placeholder="Email" value="{{EMAIL}}" />
        <label><input name="notifications" type="checkbox" {{NOTIFY}} /> Email reminders</label>
        <button type="submit">Save profile</button>
      </form>
    </section>
  </main>

  <script>
    const statusEl = document.getElementById('status');

    const setStatus = (text) => {
      statusEl.textContent = text;
    };

    const escape = (value) => {
      const div = document.createElement('div');
      div.textContent = value == null ? '' : String(value);
      return div.innerHTML;
    };

    const request = async (url, options = {}) => {
      const res = await fetch(url, {
        headers: { 'content-type': 'application/json' },
        ...options
      });
      if (!res.ok) {
        const body = await res.json().catch(() => ({}));
        throw new Error(body.error || 'Request failed');
      }
      return res.json();
    };

    document.getElementById('specialty').addEventListener('change', async (event) => {
      const name = event.target.value;
      const doctors = name ? await request(`/api/specialties/${encodeURIComponent(name)}/doctors`) : [];
      document.getElementById('doctor').innerHTML = '<option value="">Select a doctor...</option>' +
        doctors.map((d) => `<option value="${escape(d)}">${escape(d)}</option>`).join('');
    });

    const symptomSelect = document.getElementById('symptom-select');
    const customSymptom = document.getElementById('custom-symptom');

    symptomSelect.addEventListener('change', () => {
      const other = symptomSelect.value === 'Other';
      customSymptom.hidden = !other;
      customSymptom.required = other;
    });

    document.getElementById('profile-form').addEventListener('submit', async (event) => {
      event.preventDefault();
      const form = new FormData(event.target);
      try {
        await request('/api/profile', {
          method: 'PUT',
          body: JSON.stringify({
            name: form.get('name'),
            email: form.get('email'),
            notifications: form.get('notifications') !== null
          })
        });
        location.reload();
      } catch (err) {
        setStatus(err.message);
      }
    });

    document.getElementById('symptom-form').addEventListener('submit', async (event) => {
      event.preventDefault();
      const form = new FormData(event.target);
      try {
        const logged = await request('/api/symptoms', {
          method: 'POST',
          body: JSON.stringify({
            symptom: form.get('symptom') === 'Other' ? form.get('custom') : form.get('symptom'),
            severity: Number(form.get('severity')),
            duration: form.get('duration'),
            notes: form.get('notes')
          })
        });
        event.target.reset();
        setStatus(logged.advice);
        setTimeout(() => location.reload(), 1500);
      } catch (err) {
        setStatus(err.message);
      }
    });

    document.getElementById('appointment-form').addEventListener('submit', async (event) => {
      event.preventDefault();
      const form = new FormData(event.target);
      try {
        await request('/api/appointments', {
          method: 'POST',
          body: JSON.stringify(Object.fromEntries(form.entries()))
        });
        location.reload();
      } catch (err) {
        setStatus(err.message);
      }
    });

    document.body.addEventListener('click', async (event) => {
      const del = event.target.dataset.delete;
      const cancel = event.target.dataset.cancel;
      try {
        if (del && confirm('Delete this symptom log?')) {
          await request(`/api/symptoms/${del}`, { method: 'DELETE' });
          location.reload();
        }
        if (cancel && confirm('Cancel this appointment?')) {
          await request(`/api/appointments/${cancel}/cancel`, { method: 'POST' });
          location.reload();
        }
      } catch (err) {
        setStatus(err.message);
      }
    });

    document.getElementById('chat-form').addEventListener('submit', async (event) => {
      event.preventDefault();
      const input = event.target.elements.message;
      const message = input.value.trim();
      if (!message) return;
      const log = document.getElementById('chat-log');
      log.insertAdjacentHTML('beforeend', `<div><strong>You:</strong> ${escape(message)}</div>`);
      input.value = '';
      try {
        const { reply } = await request('/api/chat', {
          method: 'POST',
          body: JSON.stringify({ message })
        });
        log.insertAdjacentHTML('beforeend', `<div><strong>MediBot:</strong> ${escape(reply)}</div>`);
        log.scrollTop = log.scrollHeight;
      } catch (err) {
        setStatus(err.message);
      }
    });

  </script>
</body>
</html>
"#;
