//! HTML pages. Pure formatting: no decisions are made here.

use crate::analysis::interpreter::{score_diagnostics, AnalysisResult};

const STYLE: &str = r#"<style>
:root {
  --bg: #f5f7fb;
  --card: #ffffff;
  --text: #1f2937;
  --dim: #6b7280;
  --green: #16a34a;
  --amber: #d97706;
  --red: #dc2626;
  --blue: #2563eb;
  --border: #e5e7eb;
}
* { box-sizing: border-box; }
body {
  font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
  background: var(--bg);
  color: var(--text);
  line-height: 1.6;
  margin: 0;
  padding: 2rem;
}
main { max-width: 860px; margin: 0 auto; }
nav a { margin-right: 1rem; color: var(--blue); text-decoration: none; }
.card {
  background: var(--card);
  border: 1px solid var(--border);
  border-radius: 10px;
  padding: 1.5rem;
  margin: 1.5rem 0;
}
label { display: block; font-weight: 600; margin-top: 1rem; }
input, textarea { width: 100%; padding: 0.5rem; margin-top: 0.25rem; }
button {
  margin-top: 1.5rem;
  background: var(--blue);
  color: #fff;
  border: none;
  border-radius: 6px;
  padding: 0.6rem 1.4rem;
  cursor: pointer;
}
.score { font-size: 3rem; font-weight: 700; }
.score-excellent { color: var(--green); }
.score-good { color: var(--amber); }
.score-needs-improvement { color: var(--red); }
.skills { display: flex; gap: 1.5rem; flex-wrap: wrap; }
.skills > div { flex: 1; min-width: 240px; }
.skills li { margin: 0.2rem 0; }
pre.reply { white-space: pre-wrap; word-wrap: break-word; font-family: inherit; }
.dim { color: var(--dim); }
</style>"#;

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn page(title: &str, body: &str) -> String {
    let mut out = String::with_capacity(4096 + body.len());
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n");
    out.push_str(
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
    );
    out.push_str(&format!("<title>{}</title>\n", html_escape(title)));
    out.push_str(STYLE);
    out.push_str("\n</head>\n<body>\n<main>\n");
    out.push_str(
        "<nav><a href=\"/\">Home</a><a href=\"/screen\">Screen a Resume</a>\
         <a href=\"/create-resume\">Create a Resume</a></nav>\n",
    );
    out.push_str(body);
    out.push_str("</main>\n</body>\n</html>\n");
    out
}

pub fn home_page() -> String {
    page(
        "Resume Screener",
        r#"<h1>Resume Screener</h1>
<div class="card">
<p>Upload a job description and a resume to get an AI compatibility report:
a score out of 100, the skills you already match, and the ones worth adding.</p>
<p><a href="/screen">Screen a resume &rarr;</a></p>
</div>
"#,
    )
}

pub fn screen_page() -> String {
    page(
        "Screen a Resume",
        r#"<h1>Screen a Resume</h1>
<form class="card" action="/analyze" method="post" enctype="multipart/form-data">
<label for="job_description">Job description (PDF)</label>
<input type="file" id="job_description" name="job_description" accept=".pdf,application/pdf" required>
<label for="resume">Resume (PDF)</label>
<input type="file" id="resume" name="resume" accept=".pdf,application/pdf" required>
<button type="submit">Analyze</button>
</form>
"#,
    )
}

pub fn create_resume_page() -> String {
    page(
        "Create a Resume",
        r#"<h1>Create a Resume</h1>
<form class="card" action="/generate-resume" method="post">
<label for="name">Full name</label>
<input type="text" id="name" name="name">
<label for="email">Email</label>
<input type="email" id="email" name="email">
<label for="phone">Phone</label>
<input type="text" id="phone" name="phone">
<label for="summary">Summary</label>
<textarea id="summary" name="summary" rows="3"></textarea>
<label for="experience">Experience</label>
<textarea id="experience" name="experience" rows="6"></textarea>
<label for="education">Education</label>
<textarea id="education" name="education" rows="3"></textarea>
<label for="skills">Skills</label>
<textarea id="skills" name="skills" rows="3"></textarea>
<button type="submit">Generate</button>
</form>
"#,
    )
}

fn write_skill_list(out: &mut String, heading: &str, skills: &[String]) {
    out.push_str(&format!("<div>\n<h3>{}</h3>\n<ul>\n", html_escape(heading)));
    for skill in skills {
        out.push_str(&format!("<li>{}</li>\n", html_escape(skill)));
    }
    out.push_str("</ul>\n</div>\n");
}

/// The report page. The raw reply is shown escaped and followed by the score
/// trace as HTML comments.
pub fn result_page(result: &AnalysisResult) -> String {
    let mut body = String::with_capacity(2048 + result.reply.len());
    body.push_str("<h1>Compatibility Report</h1>\n<div class=\"card\">\n");
    body.push_str(&format!(
        "<div class=\"score {}\">{}/100</div>\n<h2 class=\"{}\">{}</h2>\n",
        result.category.css_class(),
        result.score,
        result.category.css_class(),
        result.category.label(),
    ));
    body.push_str("</div>\n<div class=\"card skills\">\n");
    write_skill_list(&mut body, "Matching Skills", &result.matching_skills);
    write_skill_list(&mut body, "Missing Skills", &result.missing_skills);
    body.push_str("</div>\n<div class=\"card\">\n<h3>Full Analysis</h3>\n");
    body.push_str(&format!(
        "<pre class=\"reply\">{}</pre>\n",
        html_escape(&result.reply)
    ));
    for line in score_diagnostics(result) {
        body.push_str(&format!("<!-- {} -->\n", line));
    }
    body.push_str("</div>\n<p><a href=\"/screen\">Analyze another resume</a></p>\n");
    page("Compatibility Report", &body)
}
