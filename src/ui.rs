use crate::models::DisplaySnapshot;

const PLACEHOLDER: &str = "--";

pub fn render_index(snapshot: &DisplaySnapshot) -> String {
    let text = |value: &Option<String>| escape_html(value.as_deref().unwrap_or(PLACEHOLDER));

    INDEX_HTML
        .replace("{{STATUS_CLASS}}", &escape_html(snapshot.status_class.as_deref().unwrap_or("")))
        .replace("{{STATUS_TEXT}}", &text(&snapshot.status_text))
        .replace("{{DISTANCE}}", &text(&snapshot.distance))
        .replace("{{SCORE}}", &text(&snapshot.score))
        .replace("{{ALERTS}}", &text(&snapshot.alerts))
        .replace(
            "{{MISSION_WIDTH}}",
            &escape_html(snapshot.mission_bar_width.as_deref().unwrap_or("0%")),
        )
        .replace("{{MISSION_TEXT}}", &text(&snapshot.mission_text))
        .replace("{{TIMESTAMP}}", &escape_html(snapshot.timestamp.as_deref().unwrap_or("")))
}

/// Escapes feed-supplied text for HTML. Braces are escaped too so a value
/// can never be mistaken for a template slot.
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '{' => out.push_str("&#123;"),
            '}' => out.push_str("&#125;"),
            other => out.push(other),
        }
    }
    out
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Monitor de Postura</title>
  <style>
    :root {
      --bg: #f3f6f4;
      --ink: #1f2a2e;
      --good: #2d7a4b;
      --bad: #c63b2b;
      --accent: #2f4858;
      --card: #ffffff;
      --shadow: 0 18px 40px rgba(47, 72, 88, 0.14);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px;
    }

    .app {
      width: min(720px, 100%);
      background: var(--card);
      border-radius: 24px;
      box-shadow: var(--shadow);
      padding: 32px;
      display: grid;
      gap: 24px;
    }

    h1 {
      margin: 0;
      font-size: 2rem;
    }

    #status {
      font-size: 1.6rem;
      font-weight: 600;
    }

    .status-good {
      color: var(--good);
    }

    .status-bad {
      color: var(--bad);
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(160px, 1fr));
      gap: 16px;
    }

    .stat {
      border: 1px solid rgba(47, 72, 88, 0.1);
      border-radius: 16px;
      padding: 16px;
      display: grid;
      gap: 6px;
    }

    .stat .label {
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.1em;
      color: #7a746d;
    }

    .stat .value {
      font-size: 1.6rem;
      font-weight: 600;
      color: var(--accent);
    }

    .mission {
      display: grid;
      gap: 8px;
    }

    .mission-track {
      height: 14px;
      border-radius: 999px;
      background: rgba(47, 72, 88, 0.1);
      overflow: hidden;
    }

    #missionBar {
      height: 100%;
      background: var(--good);
      transition: width 300ms ease;
    }

    #timestamp {
      margin: 0;
      font-size: 0.9rem;
      color: #6f6a65;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Monitor de Postura</h1>
      <div id="status" class="{{STATUS_CLASS}}">{{STATUS_TEXT}}</div>
    </header>

    <section class="panel">
      <div class="stat">
        <span class="label">Distância</span>
        <span id="distance" class="value">{{DISTANCE}}</span>
      </div>
      <div class="stat">
        <span class="label">Pontuação</span>
        <span id="score" class="value">{{SCORE}}</span>
      </div>
      <div class="stat">
        <span class="label">Alertas</span>
        <span id="alerts" class="value">{{ALERTS}}</span>
      </div>
    </section>

    <section class="mission">
      <span class="label">Missão do dia</span>
      <div class="mission-track">
        <div id="missionBar" style="width: {{MISSION_WIDTH}}"></div>
      </div>
      <span id="missionText">{{MISSION_TEXT}}</span>
    </section>

    <p id="timestamp">{{TIMESTAMP}}</p>
  </main>

  <script>
    const statusEl = document.getElementById('status');
    const distanceEl = document.getElementById('distance');
    const scoreEl = document.getElementById('score');
    const alertsEl = document.getElementById('alerts');
    const missionBar = document.getElementById('missionBar');
    const missionText = document.getElementById('missionText');
    const timestampEl = document.getElementById('timestamp');

    const setText = (el, value) => {
      if (value !== null && value !== undefined) {
        el.textContent = value;
      }
    };

    const apply = (snapshot) => {
      setText(statusEl, snapshot.status_text);
      if (snapshot.status_class !== null) {
        statusEl.className = snapshot.status_class;
      }
      setText(distanceEl, snapshot.distance);
      setText(scoreEl, snapshot.score);
      setText(alertsEl, snapshot.alerts);
      if (snapshot.mission_bar_width !== null) {
        missionBar.style.width = snapshot.mission_bar_width;
      }
      setText(missionText, snapshot.mission_text);
      setText(timestampEl, snapshot.timestamp);
    };

    const refresh = async () => {
      const res = await fetch('/api/display');
      if (!res.ok) {
        throw new Error('Unable to load display');
      }
      apply(await res.json());
    };

    setInterval(() => {
      refresh().catch((err) => console.log(err.message));
    }, 3000);
  </script>
</body>
</html>
"#;
