use crate::state::UiState;
use chrono::Local;

pub fn render_index(ui: &UiState) -> String {
    let strings = ui.language.strings();
    let logged_in = ui.user.is_some();
    let user_name = ui
        .user
        .as_ref()
        .map(|user| escape_html(&user.name))
        .unwrap_or_default();
    let today = Local::now().date_naive().to_string();

    let replacements = [
        ("{{LANG}}", ui.language.as_str().to_string()),
        ("{{DIR}}", dir_attr(ui).to_string()),
        ("{{APP_NAME}}", strings.app_name.to_string()),
        ("{{APP_TITLE}}", strings.app_title.to_string()),
        ("{{LANGUAGE_NAME}}", strings.language_name.to_string()),
        ("{{WELCOME}}", strings.welcome.to_string()),
        ("{{USER_NAME}}", user_name),
        ("{{LOGIN}}", strings.login.to_string()),
        ("{{LOGOUT}}", strings.logout.to_string()),
        ("{{LOGIN_PROMPT}}", strings.login_prompt.to_string()),
        ("{{DEMO_HINT}}", strings.demo_hint.to_string()),
        ("{{EMAIL_PLACEHOLDER}}", strings.email_placeholder.to_string()),
        (
            "{{PASSWORD_PLACEHOLDER}}",
            strings.password_placeholder.to_string(),
        ),
        ("{{DASHBOARD}}", strings.dashboard.to_string()),
        ("{{DATE_LABEL}}", strings.date_label.to_string()),
        ("{{TODAY}}", today),
        ("{{NEW_ENTRY}}", strings.new_entry.to_string()),
        ("{{AVG_DURATION}}", strings.avg_duration.to_string()),
        ("{{AVG_QUALITY}}", strings.avg_quality.to_string()),
        ("{{CONSISTENCY}}", strings.consistency.to_string()),
        ("{{SLEEP_TREND}}", strings.sleep_trend.to_string()),
        ("{{QUALITY_TREND}}", strings.quality_trend.to_string()),
        ("{{HOURS}}", strings.hours.to_string()),
        ("{{SCORE}}", strings.score.to_string()),
        ("{{BED_TIME}}", strings.bed_time.to_string()),
        ("{{WAKE_TIME}}", strings.wake_time.to_string()),
        ("{{QUALITY}}", strings.quality.to_string()),
        ("{{QUALITY_LOW}}", strings.quality_low.to_string()),
        ("{{QUALITY_HIGH}}", strings.quality_high.to_string()),
        ("{{NOTES}}", strings.notes.to_string()),
        ("{{NOTES_PLACEHOLDER}}", strings.notes_placeholder.to_string()),
        ("{{SAVE}}", strings.save.to_string()),
        ("{{SAVING}}", strings.saving.to_string()),
        ("{{SAVED}}", strings.saved.to_string()),
        ("{{ANALYSIS_TITLE}}", strings.analysis_title.to_string()),
        ("{{ANALYZING}}", strings.analyzing.to_string()),
        (
            "{{GENERATE_INSIGHTS}}",
            strings.generate_insights.to_string(),
        ),
        ("{{REFRESH_ANALYSIS}}", strings.refresh_analysis.to_string()),
        ("{{RECOMMENDATIONS}}", strings.recommendations.to_string()),
        ("{{LOGIN_HIDDEN}}", hidden_attr(logged_in)),
        ("{{DASH_HIDDEN}}", hidden_attr(!logged_in)),
        ("{{NAV_USER_HIDDEN}}", hidden_attr(!logged_in)),
        (
            "{{FORM_HIDDEN}}",
            hidden_attr(!(logged_in && ui.form_open)),
        ),
    ];

    replacements
        .iter()
        .fold(INDEX_HTML.to_string(), |page, (key, value)| {
            page.replace(key, value)
        })
}

fn dir_attr(ui: &UiState) -> &'static str {
    if ui.language.is_rtl() {
        "rtl"
    } else {
        "ltr"
    }
}

fn hidden_attr(hidden: bool) -> String {
    if hidden {
        " hidden".to_string()
    } else {
        String::new()
    }
}

fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="{{LANG}}" dir="{{DIR}}">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{APP_TITLE}}</title>
  <style>
    :root {
      --bg: #0b1120;
      --bg-card: #111a2e;
      --bg-inset: #1a2540;
      --border: rgba(129, 140, 248, 0.18);
      --ink: #e2e8f0;
      --muted: #8fa0bd;
      --accent: #818cf8;
      --accent-strong: #6366f1;
      --quality: #c084fc;
      --good: #34d399;
      --shadow: 0 24px 60px rgba(2, 6, 23, 0.55);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, rgba(99, 102, 241, 0.18), transparent 55%), var(--bg);
      color: var(--ink);
      font-family: 'Segoe UI', 'Noto Kufi Arabic', system-ui, sans-serif;
    }

    nav {
      position: sticky;
      top: 0;
      z-index: 20;
      display: flex;
      align-items: center;
      justify-content: space-between;
      gap: 16px;
      padding: 14px 28px;
      background: rgba(11, 17, 32, 0.85);
      backdrop-filter: blur(10px);
      border-bottom: 1px solid var(--border);
    }

    .brand {
      display: flex;
      align-items: center;
      gap: 10px;
      font-size: 1.2rem;
      font-weight: 700;
      color: var(--accent);
    }

    .brand .moon {
      display: grid;
      place-items: center;
      width: 34px;
      height: 34px;
      border-radius: 10px;
      background: var(--accent-strong);
      color: white;
    }

    .nav-actions {
      display: flex;
      align-items: center;
      gap: 14px;
    }

    .nav-actions .welcome {
      color: var(--muted);
      font-size: 0.92rem;
    }

    .nav-actions .welcome strong {
      color: var(--ink);
    }

    main {
      max-width: 1080px;
      margin: 0 auto;
      padding: 32px 20px 56px;
      display: grid;
      gap: 28px;
    }

    h1 {
      margin: 0;
      font-size: clamp(1.6rem, 3vw, 2.1rem);
    }

    h2 {
      margin: 0 0 14px;
      font-size: 1.15rem;
    }

    .subtitle {
      margin: 6px 0 0;
      color: var(--muted);
      font-size: 0.95rem;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 10px 18px;
      font-size: 0.95rem;
      font-weight: 600;
      cursor: pointer;
      transition: transform 120ms ease, box-shadow 120ms ease;
    }

    button:active {
      transform: scale(0.97);
    }

    .btn-primary {
      background: var(--accent-strong);
      color: white;
      box-shadow: 0 10px 24px rgba(99, 102, 241, 0.35);
    }

    .btn-light {
      background: white;
      color: #1e1b4b;
    }

    .pill {
      background: var(--bg-inset);
      color: var(--muted);
      padding: 8px 14px;
      font-size: 0.85rem;
    }

    .icon-btn {
      background: transparent;
      color: var(--muted);
      font-size: 1.3rem;
      padding: 2px 10px;
    }

    .link-btn {
      background: transparent;
      color: var(--accent);
      text-decoration: underline;
      font-size: 0.85rem;
      padding: 6px 0;
    }

    .login {
      display: grid;
      place-items: center;
      min-height: 55vh;
    }

    .login-card {
      width: min(420px, 100%);
      background: var(--bg-card);
      border: 1px solid var(--border);
      border-radius: 20px;
      box-shadow: var(--shadow);
      padding: 34px;
      display: grid;
      gap: 12px;
      text-align: center;
    }

    .login-card form {
      display: grid;
      gap: 12px;
      margin-top: 10px;
    }

    input, textarea {
      width: 100%;
      background: var(--bg-inset);
      border: 1px solid var(--border);
      border-radius: 12px;
      padding: 12px 14px;
      color: var(--ink);
      font-size: 0.95rem;
      font-family: inherit;
    }

    input:focus, textarea:focus {
      outline: 2px solid var(--accent-strong);
    }

    .hint {
      margin: 4px 0 0;
      color: var(--muted);
      font-size: 0.8rem;
    }

    .dashboard {
      display: grid;
      gap: 26px;
    }

    .dashboard-header {
      display: flex;
      flex-wrap: wrap;
      align-items: center;
      justify-content: space-between;
      gap: 16px;
    }

    .metric-cards {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
      gap: 16px;
    }

    .stat {
      background: var(--bg-card);
      border: 1px solid var(--border);
      border-radius: 18px;
      padding: 20px;
      display: grid;
      gap: 6px;
    }

    .stat .label {
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: var(--muted);
    }

    .stat .value {
      font-size: 2.1rem;
      font-weight: 700;
    }

    .stat .unit {
      color: var(--muted);
      font-size: 0.85rem;
    }

    .charts {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(320px, 1fr));
      gap: 16px;
    }

    .chart-card {
      background: var(--bg-card);
      border: 1px solid var(--border);
      border-radius: 18px;
      padding: 18px;
    }

    .chart-card svg {
      width: 100%;
      height: 240px;
      display: block;
    }

    .chart-line {
      fill: none;
      stroke: var(--accent);
      stroke-width: 3;
    }

    .chart-area {
      fill: rgba(129, 140, 248, 0.18);
      stroke: none;
    }

    .chart-point {
      fill: var(--bg-card);
      stroke: var(--accent);
      stroke-width: 2;
    }

    .chart-bar {
      fill: var(--quality);
    }

    .chart-grid {
      stroke: rgba(148, 163, 184, 0.16);
    }

    .chart-label {
      fill: var(--muted);
      font-size: 11px;
      font-family: inherit;
    }

    .analysis {
      background: linear-gradient(120deg, rgba(79, 70, 229, 0.35), rgba(124, 58, 237, 0.25)), var(--bg-card);
      border: 1px solid rgba(129, 140, 248, 0.35);
      border-radius: 20px;
      padding: 26px;
      display: grid;
      gap: 18px;
    }

    .analysis-header {
      display: flex;
      flex-wrap: wrap;
      align-items: center;
      justify-content: space-between;
      gap: 12px;
    }

    .analysis-header h2 {
      margin: 0;
    }

    .analysis-loading {
      display: flex;
      align-items: center;
      gap: 12px;
      color: var(--muted);
      padding: 18px 0;
    }

    .spinner {
      width: 18px;
      height: 18px;
      border-radius: 50%;
      border: 3px solid rgba(129, 140, 248, 0.3);
      border-top-color: var(--accent);
      animation: spin 900ms linear infinite;
    }

    .analysis-result {
      display: grid;
      grid-template-columns: 2fr 1fr;
      gap: 20px;
    }

    .analysis-summary {
      margin: 0 0 16px;
      background: rgba(255, 255, 255, 0.06);
      border-radius: 14px;
      padding: 16px;
      line-height: 1.6;
    }

    .analysis-main h3 {
      margin: 0 0 10px;
      font-size: 1rem;
    }

    .analysis-main ol {
      margin: 0;
      padding-inline-start: 22px;
      display: grid;
      gap: 8px;
      color: var(--muted);
    }

    .analysis-score {
      display: grid;
      place-content: center;
      justify-items: center;
      gap: 6px;
      background: rgba(2, 6, 23, 0.45);
      border: 1px solid var(--border);
      border-radius: 16px;
      padding: 20px;
    }

    .score-value {
      font-size: 3.2rem;
      font-weight: 700;
    }

    .score-label {
      text-transform: uppercase;
      letter-spacing: 0.18em;
      font-size: 0.75rem;
      color: var(--muted);
    }

    .modal {
      position: fixed;
      inset: 0;
      z-index: 40;
      display: grid;
      place-items: center;
      padding: 20px;
      background: rgba(2, 6, 23, 0.7);
      backdrop-filter: blur(6px);
    }

    .modal-card {
      width: min(480px, 100%);
      background: var(--bg-card);
      border: 1px solid var(--border);
      border-radius: 20px;
      box-shadow: var(--shadow);
      padding: 26px;
    }

    .modal-header {
      display: flex;
      align-items: center;
      justify-content: space-between;
      margin-bottom: 14px;
    }

    .modal-card form {
      display: grid;
      gap: 14px;
    }

    .modal-card label {
      display: grid;
      gap: 6px;
      font-size: 0.9rem;
      color: var(--muted);
    }

    .modal-card textarea {
      min-height: 84px;
      resize: vertical;
    }

    .range-ends {
      display: flex;
      justify-content: space-between;
      font-size: 0.75rem;
      color: var(--muted);
    }

    .status {
      min-height: 1.2em;
      font-size: 0.92rem;
      color: var(--muted);
    }

    .status[data-type='error'] {
      color: #f87171;
    }

    .status[data-type='ok'] {
      color: var(--good);
    }

    @keyframes spin {
      to {
        transform: rotate(360deg);
      }
    }

    @media (max-width: 720px) {
      .analysis-result {
        grid-template-columns: 1fr;
      }
      .nav-actions .welcome {
        display: none;
      }
    }
  </style>
</head>
<body>
  <nav>
    <div class="brand">
      <span class="moon">☾</span>
      <span>{{APP_NAME}}</span>
    </div>
    <div class="nav-actions">
      <button id="lang-btn" class="pill" type="button">{{LANGUAGE_NAME}}</button>
      <span class="welcome"{{NAV_USER_HIDDEN}}>{{WELCOME}}, <strong>{{USER_NAME}}</strong></span>
      <button id="logout-btn" class="pill" type="button"{{NAV_USER_HIDDEN}}>{{LOGOUT}}</button>
    </div>
  </nav>

  <main>
    <section id="login-screen" class="login"{{LOGIN_HIDDEN}}>
      <div class="login-card">
        <h1>{{APP_TITLE}}</h1>
        <p class="subtitle">{{LOGIN_PROMPT}}</p>
        <form id="login-form">
          <input id="login-email" type="email" placeholder="{{EMAIL_PLACEHOLDER}}" required />
          <input id="login-password" type="password" placeholder="{{PASSWORD_PLACEHOLDER}}" required />
          <button class="btn-primary" type="submit">{{LOGIN}}</button>
        </form>
        <p class="hint">{{DEMO_HINT}}</p>
      </div>
    </section>

    <section id="dashboard-screen" class="dashboard"{{DASH_HIDDEN}}>
      <div class="dashboard-header">
        <div>
          <h1>{{DASHBOARD}}</h1>
          <p class="subtitle">{{DATE_LABEL}}: {{TODAY}}</p>
        </div>
        <button id="new-entry-btn" class="btn-primary" type="button">+ {{NEW_ENTRY}}</button>
      </div>

      <div class="metric-cards">
        <div class="stat">
          <span class="label">{{AVG_DURATION}}</span>
          <span class="value" id="metric-duration">--</span>
          <span class="unit">{{HOURS}}</span>
        </div>
        <div class="stat">
          <span class="label">{{AVG_QUALITY}}</span>
          <span class="value" id="metric-quality">--</span>
          <span class="unit">/ 10</span>
        </div>
        <div class="stat">
          <span class="label">{{CONSISTENCY}}</span>
          <span class="value" id="metric-consistency">--</span>
          <span class="unit">%</span>
        </div>
      </div>

      <div class="charts">
        <div class="chart-card">
          <h2>{{SLEEP_TREND}}</h2>
          <svg id="duration-chart" viewBox="0 0 600 240" role="img" aria-label="{{SLEEP_TREND}}"></svg>
        </div>
        <div class="chart-card">
          <h2>{{QUALITY_TREND}}</h2>
          <svg id="quality-chart" viewBox="0 0 600 240" role="img" aria-label="{{QUALITY_TREND}}"></svg>
        </div>
      </div>

      <div class="analysis">
        <div class="analysis-header">
          <h2>{{ANALYSIS_TITLE}}</h2>
          <button id="analyze-btn" class="btn-light" type="button">{{GENERATE_INSIGHTS}}</button>
        </div>
        <div id="analysis-loading" class="analysis-loading" hidden>
          <span class="spinner"></span>
          <span>{{ANALYZING}}</span>
        </div>
        <div id="analysis-result" class="analysis-result" hidden>
          <div class="analysis-main">
            <p id="analysis-summary" class="analysis-summary"></p>
            <h3>{{RECOMMENDATIONS}}</h3>
            <ol id="analysis-recommendations"></ol>
          </div>
          <div class="analysis-score">
            <span id="analysis-score" class="score-value">0</span>
            <span class="score-label">{{SCORE}}</span>
            <button id="refresh-analysis-btn" class="link-btn" type="button">{{REFRESH_ANALYSIS}}</button>
          </div>
        </div>
      </div>
    </section>

    <div class="status" id="status"></div>
  </main>

  <div id="entry-modal" class="modal"{{FORM_HIDDEN}}>
    <div class="modal-card">
      <div class="modal-header">
        <h2>{{NEW_ENTRY}}</h2>
        <button id="close-form-btn" class="icon-btn" type="button">×</button>
      </div>
      <form id="entry-form">
        <label>{{BED_TIME}}
          <input id="entry-bed" type="datetime-local" required />
        </label>
        <label>{{WAKE_TIME}}
          <input id="entry-wake" type="datetime-local" required />
        </label>
        <label>{{QUALITY}}: <span id="quality-value">5</span>
          <input id="entry-quality" type="range" min="1" max="10" value="5" />
          <span class="range-ends"><span>{{QUALITY_LOW}}</span><span>{{QUALITY_HIGH}}</span></span>
        </label>
        <label>{{NOTES}}
          <textarea id="entry-notes" placeholder="{{NOTES_PLACEHOLDER}}"></textarea>
        </label>
        <button class="btn-primary" type="submit">{{SAVE}}</button>
      </form>
    </div>
  </div>

  <script>
    const SAVING_TEXT = '{{SAVING}}';
    const SAVED_TEXT = '{{SAVED}}';

    const statusEl = document.getElementById('status');
    const dashboardScreen = document.getElementById('dashboard-screen');
    const loginForm = document.getElementById('login-form');
    const loginEmail = document.getElementById('login-email');
    const loginPassword = document.getElementById('login-password');
    const langBtn = document.getElementById('lang-btn');
    const logoutBtn = document.getElementById('logout-btn');
    const metricDuration = document.getElementById('metric-duration');
    const metricQuality = document.getElementById('metric-quality');
    const metricConsistency = document.getElementById('metric-consistency');
    const durationChart = document.getElementById('duration-chart');
    const qualityChart = document.getElementById('quality-chart');
    const newEntryBtn = document.getElementById('new-entry-btn');
    const entryModal = document.getElementById('entry-modal');
    const closeFormBtn = document.getElementById('close-form-btn');
    const entryForm = document.getElementById('entry-form');
    const entryBed = document.getElementById('entry-bed');
    const entryWake = document.getElementById('entry-wake');
    const entryQuality = document.getElementById('entry-quality');
    const qualityValue = document.getElementById('quality-value');
    const entryNotes = document.getElementById('entry-notes');
    const analyzeBtn = document.getElementById('analyze-btn');
    const analysisLoading = document.getElementById('analysis-loading');
    const analysisResult = document.getElementById('analysis-result');
    const analysisSummary = document.getElementById('analysis-summary');
    const analysisRecommendations = document.getElementById('analysis-recommendations');
    const analysisScore = document.getElementById('analysis-score');
    const refreshAnalysisBtn = document.getElementById('refresh-analysis-btn');

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const formatAxisValue = (value) => {
      const rounded = Math.round(value * 10) / 10;
      return Number.isInteger(rounded) ? rounded.toString() : rounded.toFixed(1);
    };

    const chartFrame = (points, min, max) => {
      const width = 600;
      const height = 240;
      const paddingX = 44;
      const paddingY = 34;
      const top = 20;
      const range = max - min;
      const xStep = points.length > 1 ? (width - paddingX * 2) / (points.length - 1) : 0;
      const x = (index) => paddingX + index * xStep;
      const y = (value) => height - paddingY - (value - min) * ((height - top - paddingY) / range);

      const ticks = 4;
      let grid = '';
      for (let i = 0; i <= ticks; i += 1) {
        const value = min + (range * i) / ticks;
        const yPos = y(value);
        grid += `<line class='chart-grid' x1='${paddingX}' y1='${yPos}' x2='${width - paddingX}' y2='${yPos}' />`;
        grid += `<text class='chart-label' x='${paddingX - 10}' y='${yPos + 4}' text-anchor='end'>${formatAxisValue(value)}</text>`;
      }

      const labelEvery = points.length > 8 ? 2 : 1;
      const labels = points
        .map((point, index) => {
          if (index % labelEvery !== 0) {
            return '';
          }
          return `<text class='chart-label' x='${x(index)}' y='${height - paddingY + 18}' text-anchor='middle'>${point.label}</text>`;
        })
        .join('');

      return { width, height, paddingX, x, y, grid, labels };
    };

    const renderAreaChart = (svg, points) => {
      if (!points.length) {
        svg.innerHTML = `<text class='chart-label' x='50%' y='50%' text-anchor='middle'>--</text>`;
        return;
      }

      const values = points.map((point) => point.value);
      let min = Math.min(...values, 0);
      let max = Math.max(...values, 0);
      if (min === max) {
        max += 1;
      }

      const frame = chartFrame(points, min, max);
      const path = points
        .map((point, index) => `${index === 0 ? 'M' : 'L'} ${frame.x(index).toFixed(2)} ${frame.y(point.value).toFixed(2)}`)
        .join(' ');
      const last = points.length - 1;
      const area = `${path} L ${frame.x(last).toFixed(2)} ${frame.y(min).toFixed(2)} L ${frame.x(0).toFixed(2)} ${frame.y(min).toFixed(2)} Z`;
      const circles = points
        .map((point, index) => `<circle class='chart-point' cx='${frame.x(index)}' cy='${frame.y(point.value)}' r='4' />`)
        .join('');

      svg.innerHTML = `${frame.grid}<path class='chart-area' d='${area}' /><path class='chart-line' d='${path}' />${circles}${frame.labels}`;
    };

    const renderBarChart = (svg, points) => {
      if (!points.length) {
        svg.innerHTML = `<text class='chart-label' x='50%' y='50%' text-anchor='middle'>--</text>`;
        return;
      }

      const frame = chartFrame(points, 0, 10);
      const slot = points.length > 1 ? (600 - frame.paddingX * 2) / (points.length - 1) : 0;
      const barWidth = points.length > 1 ? Math.min(30, slot * 0.55) : 30;
      const bars = points
        .map((point, index) => {
          const xPos = frame.x(index) - barWidth / 2;
          const yPos = frame.y(point.value);
          return `<rect class='chart-bar' x='${xPos.toFixed(2)}' y='${yPos.toFixed(2)}' width='${barWidth.toFixed(2)}' height='${(frame.y(0) - yPos).toFixed(2)}' rx='4' />`;
        })
        .join('');

      svg.innerHTML = `${frame.grid}${bars}${frame.labels}`;
    };

    const renderMetrics = (stats) => {
      metricDuration.textContent = stats.avg_duration_hours.toFixed(1);
      metricQuality.textContent = stats.avg_quality.toFixed(1);
      metricConsistency.textContent = stats.consistency_score.toFixed(0);
    };

    const loadDashboard = async () => {
      const res = await fetch('/api/dashboard');
      if (!res.ok) {
        throw new Error('Unable to load dashboard');
      }
      const data = await res.json();
      renderMetrics(data.stats);
      renderAreaChart(durationChart, data.points.map((point) => ({ label: point.label, value: point.duration_hours })));
      renderBarChart(qualityChart, data.points.map((point) => ({ label: point.label, value: point.quality })));
    };

    const renderAnalysis = (analysis) => {
      analyzeBtn.hidden = analysis.status !== 'not_started';
      analysisLoading.hidden = analysis.status !== 'in_flight';
      analysisResult.hidden = analysis.status !== 'resolved';

      if (analysis.status === 'resolved') {
        analysisSummary.textContent = analysis.result.summary;
        analysisRecommendations.innerHTML = '';
        analysis.result.recommendations.forEach((rec) => {
          const item = document.createElement('li');
          item.textContent = rec;
          analysisRecommendations.appendChild(item);
        });
        analysisScore.textContent = Math.round(analysis.result.score);
      }
    };

    const pollAnalysis = async () => {
      const res = await fetch('/api/analysis');
      if (!res.ok) {
        return;
      }
      const analysis = await res.json();
      renderAnalysis(analysis);
      if (analysis.status === 'in_flight') {
        setTimeout(pollAnalysis, 1000);
      }
    };

    const triggerAnalysis = async () => {
      renderAnalysis({ status: 'in_flight' });
      const res = await fetch('/api/analyze', { method: 'POST' });
      if (!res.ok) {
        setStatus(await res.text(), 'error');
        renderAnalysis({ status: 'not_started' });
        return;
      }
      const analysis = await res.json();
      renderAnalysis(analysis);
      if (analysis.status === 'in_flight') {
        setTimeout(pollAnalysis, 1000);
      }
    };

    const openForm = async () => {
      const res = await fetch('/api/form/open', { method: 'POST' });
      if (!res.ok) {
        setStatus(await res.text(), 'error');
        return;
      }
      entryModal.hidden = false;
    };

    const closeForm = async () => {
      entryModal.hidden = true;
      await fetch('/api/form/close', { method: 'POST' });
    };

    const saveEntry = async (event) => {
      event.preventDefault();
      setStatus(SAVING_TEXT, 'info');
      const payload = {
        bed_time: entryBed.value,
        wake_time: entryWake.value,
        quality: Number(entryQuality.value),
        notes: entryNotes.value
      };
      const res = await fetch('/api/sessions', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify(payload)
      });
      if (!res.ok) {
        setStatus(await res.text(), 'error');
        return;
      }
      entryModal.hidden = true;
      entryForm.reset();
      qualityValue.textContent = entryQuality.value;
      await loadDashboard();
      setStatus(SAVED_TEXT, 'ok');
      setTimeout(() => setStatus('', ''), 1400);
    };

    const submitLogin = async (event) => {
      event.preventDefault();
      const res = await fetch('/api/login', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify({ email: loginEmail.value, password: loginPassword.value })
      });
      if (!res.ok) {
        setStatus(await res.text(), 'error');
        return;
      }
      window.location.reload();
    };

    const toggleLanguage = async () => {
      const next = document.documentElement.lang === 'en' ? 'ar' : 'en';
      await fetch('/api/language', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify({ language: next })
      });
      window.location.reload();
    };

    const logout = async () => {
      await fetch('/api/logout', { method: 'POST' });
      window.location.reload();
    };

    loginForm.addEventListener('submit', (event) => {
      submitLogin(event).catch((err) => setStatus(err.message, 'error'));
    });
    langBtn.addEventListener('click', () => {
      toggleLanguage().catch((err) => setStatus(err.message, 'error'));
    });
    logoutBtn.addEventListener('click', () => {
      logout().catch((err) => setStatus(err.message, 'error'));
    });
    newEntryBtn.addEventListener('click', () => {
      openForm().catch((err) => setStatus(err.message, 'error'));
    });
    closeFormBtn.addEventListener('click', () => {
      closeForm().catch((err) => setStatus(err.message, 'error'));
    });
    entryForm.addEventListener('submit', (event) => {
      saveEntry(event).catch((err) => setStatus(err.message, 'error'));
    });
    entryQuality.addEventListener('input', () => {
      qualityValue.textContent = entryQuality.value;
    });
    analyzeBtn.addEventListener('click', () => {
      triggerAnalysis().catch((err) => setStatus(err.message, 'error'));
    });
    refreshAnalysisBtn.addEventListener('click', () => {
      triggerAnalysis().catch((err) => setStatus(err.message, 'error'));
    });

    if (!dashboardScreen.hidden) {
      loadDashboard().catch((err) => setStatus(err.message, 'error'));
      pollAnalysis().catch(() => {});
    }
  </script>
</body>
</html>
"#;
