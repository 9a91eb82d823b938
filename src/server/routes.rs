use crate::data::registry::DataRegistry;
use crate::server::api;

pub struct HttpResponse {
    pub status_code: u16,
    pub status_text: &'static str,
    pub content_type: &'static str,
    pub body: String,
}

impl HttpResponse {
    pub fn to_http_string(&self) -> String {
        format!(
            "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            self.status_code,
            self.status_text,
            self.content_type,
            self.body.len(),
            self.body
        )
    }
}

pub fn route_request(
    registry: &DataRegistry,
    method: &str,
    path: &str,
    body: &str,
) -> HttpResponse {
    match (method, path) {
        ("GET", "/") => HttpResponse {
            status_code: 200,
            status_text: "OK",
            content_type: "text/html; charset=utf-8",
            body: index_html(),
        },
        ("GET", "/api/health") => match api::health_payload(registry) {
            Ok(payload) => json_ok(payload),
            Err(err) => error_response(500, "Internal Server Error", &err.to_string()),
        },
        ("GET", "/api/services") => match api::services_payload(registry) {
            Ok(payload) => json_ok(payload),
            Err(err) => error_response(500, "Internal Server Error", &err.to_string()),
        },
        ("POST", "/api/demand") => match api::demand_payload(body) {
            Ok(payload) => json_ok(payload),
            Err(err) => request_error_response(err),
        },
        ("POST", "/api/plan") => match api::plan_payload(registry, body) {
            Ok(payload) => json_ok(payload),
            Err(err) => request_error_response(err),
        },
        ("POST", "/api/scenario") => match api::scenario_payload(registry, body) {
            Ok(payload) => json_ok(payload),
            Err(err) => request_error_response(err),
        },
        _ => error_response(404, "Not Found", "Route not found"),
    }
}

fn json_ok(body: String) -> HttpResponse {
    HttpResponse {
        status_code: 200,
        status_text: "OK",
        content_type: "application/json",
        body,
    }
}

fn request_error_response(err: api::RequestError) -> HttpResponse {
    match err {
        api::RequestError::Parse(err) => {
            error_response(400, "Bad Request", &format!("Invalid request body: {err}"))
        }
        api::RequestError::Validation(validation) => {
            validation_error_response(400, "Bad Request", validation)
        }
    }
}

fn validation_error_response(
    status_code: u16,
    status_text: &'static str,
    payload: api::ValidationErrorResponse,
) -> HttpResponse {
    let fallback =
        "{\n  \"status\": \"error\",\n  \"message\": \"Validation failed\"\n}".to_string();

    HttpResponse {
        status_code,
        status_text,
        content_type: "application/json",
        body: serde_json::to_string_pretty(&payload).unwrap_or(fallback),
    }
}

fn error_response(status_code: u16, status_text: &'static str, message: &str) -> HttpResponse {
    HttpResponse {
        status_code,
        status_text,
        content_type: "application/json",
        body: format!(
            "{{\n  \"status\": \"error\",\n  \"message\": {}\n}}",
            serde_json::to_string(message).unwrap_or_else(|_| "\"Unknown error\"".to_string())
        ),
    }
}

fn index_html() -> String {
    r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width,initial-scale=1" />
  <title>Cityplan API Console</title>
  <style>
    body { font-family: Arial, sans-serif; max-width: 900px; margin: 24px auto; padding: 0 12px; }
    h1 { margin-bottom: 8px; }
    .card { border: 1px solid #ddd; border-radius: 8px; padding: 14px; margin: 14px 0; }
    label { display:block; margin: 8px 0 4px; font-weight: 600; }
    textarea, input { width: 100%; padding: 8px; box-sizing: border-box; font-family: monospace; }
    button { margin-top: 12px; padding: 8px 14px; }
    pre { background: #111; color: #aef2ae; padding: 12px; overflow: auto; border-radius: 6px; min-height: 180px; }
  </style>
</head>
<body>
  <h1>Cityplan Local API</h1>
  <p>Services capacity table loaded at startup; sizing and scenario endpoints below.</p>

  <div class="card">
    <strong>Health / Services</strong>
    <div>
      <button id="health-btn">GET /api/health</button>
      <button id="services-btn">GET /api/services</button>
    </div>
  </div>

  <div class="card">
    <strong>Demand</strong>
    <label for="counts">Home counts (JSON)</label>
    <textarea id="counts" rows="3">{"counts": {"Regular RZ": 10, "Epic": 2}}</textarea>
    <div><button id="demand-btn">POST /api/demand</button></div>
  </div>

  <div class="card">
    <strong>Scenario</strong>
    <label for="rows">Scenario rows (JSON)</label>
    <textarea id="rows" rows="5">{"rows": [{"service": "Water", "building": "Plant", "level": 1, "quantity": 2}]}</textarea>
    <div><button id="scenario-btn">POST /api/scenario</button></div>
  </div>

  <pre id="output">Ready.</pre>

  <script>
    const output = document.getElementById('output');

    async function request(path, options) {
      output.textContent = 'Loading…';
      const response = await fetch(path, options);
      const text = await response.text();
      output.textContent = 'HTTP ' + response.status + '\\n' + text;
    }

    document.getElementById('health-btn').addEventListener('click', () => {
      request('/api/health', { method: 'GET' });
    });
    document.getElementById('services-btn').addEventListener('click', () => {
      request('/api/services', { method: 'GET' });
    });
    document.getElementById('demand-btn').addEventListener('click', () => {
      request('/api/demand', {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: document.getElementById('counts').value,
      });
    });
    document.getElementById('scenario-btn').addEventListener('click', () => {
      request('/api/scenario', {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: document.getElementById('rows').value,
      });
    });
  </script>
</body>
</html>
"#
    .to_string()
}
