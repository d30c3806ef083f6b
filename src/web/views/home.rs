use super::render_layout;
use crate::web::flash::Notice;

pub fn render_home(notices: &[Notice]) -> String {
    let content = r#"<section class="home">
<h1>Capital Family Clinic</h1>
<p>Manage clinics, patients, appointments and the tests scheduled for them.
Statuses and results are fixed lists whose labels can be edited.</p>
<ul class="cards">
  <li><a href="/clinics">Clinics</a></li>
  <li><a href="/patients">Patients</a></li>
  <li><a href="/appointments">Appointments</a></li>
  <li><a href="/scheduledtests">Scheduled Tests</a></li>
  <li><a href="/tests">Tests</a></li>
  <li><a href="/statuses">Statuses</a></li>
  <li><a href="/results">Results</a></li>
</ul>
<p>Use <a href="/export">Export</a> to download the clinic, patient, appointment and
scheduled test reports as one spreadsheet.</p>
</section>"#;
    render_layout("Home", notices, content)
}
