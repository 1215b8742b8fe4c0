//! Form-variant demo page emitter.
//!
//! The simple interactive page: a configuration form (entity id, action,
//! processing mode) and a results panel whose script synthesizes display
//! metrics locally on submit. Everything is embedded at generation time;
//! the page makes no network calls.

use crate::emit::escape::escape_html;
use crate::emit::template::render;
use crate::error::Result;
use crate::spec::AgentDescriptor;

const FORM_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{display_name}} - Interactive Demo</title>
    <style>
        :root {
            --primary: #742774;
            --secondary: #00a651;
            --accent: #4a90e2;
            --dark: #1e1e1e;
            --light: #f5f5f5;
            --error: #e74c3c;
        }

        * {
            margin: 0;
            padding: 0;
            box-sizing: border-box;
        }

        body {
            font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
            background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
            min-height: 100vh;
            display: flex;
            justify-content: center;
            align-items: center;
            padding: 20px;
        }

        .container {
            background: white;
            border-radius: 20px;
            box-shadow: 0 20px 60px rgba(0,0,0,0.3);
            max-width: 1200px;
            width: 100%;
            overflow: hidden;
        }

        .header {
            background: linear-gradient(135deg, var(--primary) 0%, var(--secondary) 100%);
            color: white;
            padding: 30px;
            text-align: center;
        }

        .header h1 {
            font-size: 2.5em;
            margin-bottom: 10px;
        }

        .mode-toggle {
            display: flex;
            justify-content: center;
            gap: 20px;
            margin-top: 20px;
        }

        .mode-btn {
            padding: 10px 20px;
            border: 2px solid white;
            background: transparent;
            color: white;
            border-radius: 25px;
            cursor: pointer;
            transition: all 0.3s ease;
            font-weight: bold;
        }

        .mode-btn.active {
            background: white;
            color: var(--primary);
        }

        .content {
            padding: 30px;
            display: grid;
            grid-template-columns: 1fr 1fr;
            gap: 30px;
        }

        .panel {
            background: var(--light);
            border-radius: 15px;
            padding: 25px;
        }

        .form-group {
            margin-bottom: 20px;
        }

        .form-group label {
            display: block;
            margin-bottom: 8px;
            font-weight: 600;
            color: var(--dark);
        }

        .form-group input, .form-group select {
            width: 100%;
            padding: 12px;
            border: 2px solid #e0e0e0;
            border-radius: 8px;
            font-size: 14px;
        }

        .btn {
            padding: 12px 24px;
            border: none;
            border-radius: 8px;
            font-weight: 600;
            cursor: pointer;
            transition: all 0.3s ease;
            width: 100%;
            margin-top: 10px;
        }

        .btn-primary {
            background: linear-gradient(135deg, var(--primary), var(--secondary));
            color: white;
        }

        .btn:hover {
            transform: translateY(-2px);
            box-shadow: 0 5px 15px rgba(0,0,0,0.2);
        }

        .results {
            margin-top: 20px;
            padding: 20px;
            background: white;
            border-radius: 10px;
            display: none;
        }

        .results.active {
            display: block;
        }

        .metrics {
            display: grid;
            grid-template-columns: repeat(3, 1fr);
            gap: 15px;
            margin-top: 20px;
        }

        .metric {
            text-align: center;
            padding: 15px;
            background: var(--light);
            border-radius: 10px;
        }

        .metric-value {
            font-size: 24px;
            font-weight: bold;
            color: var(--primary);
        }

        .metric-label {
            color: #666;
            margin-top: 5px;
        }

        .systems {
            display: flex;
            flex-wrap: wrap;
            gap: 10px;
            margin-top: 15px;
        }

        .system-badge {
            padding: 5px 12px;
            background: var(--secondary);
            color: white;
            border-radius: 15px;
            font-size: 12px;
        }
    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>🚀 {{display_name}}</h1>
            <p>{{description}}</p>
            <div class="mode-toggle">
                <button class="mode-btn active" onclick="setMode('demo')">Demo Mode</button>
                <button class="mode-btn" onclick="setMode('live')">Live Mode</button>
            </div>
        </div>

        <div class="content">
            <div class="panel">
                <h2>Configuration</h2>

                <div class="form-group">
                    <label>Entity ID</label>
                    <input type="text" id="entityId" placeholder="Enter entity ID" value="DEMO123">
                </div>

                <div class="form-group">
                    <label>Action</label>
                    <select id="action">
                        <option value="execute">Execute</option>
                        <option value="analyze">Analyze</option>
                        <option value="report">Generate Report</option>
                        <option value="optimize">Optimize</option>
                    </select>
                </div>

                <div class="form-group">
                    <label>Processing Mode</label>
                    <select id="mode">
                        <option value="real-time">Real-time</option>
                        <option value="batch">Batch</option>
                        <option value="scheduled">Scheduled</option>
                    </select>
                </div>

                <button class="btn btn-primary" onclick="executeAgent()">Execute Agent</button>
            </div>

            <div class="panel">
                <h2>Results</h2>

                <div class="results" id="results">
                    <h3>Operation Complete</h3>
                    <div class="metrics">
                        <div class="metric">
                            <div class="metric-value" id="processed">-</div>
                            <div class="metric-label">Items Processed</div>
                        </div>
                        <div class="metric">
                            <div class="metric-value" id="efficiency">-</div>
                            <div class="metric-label">Efficiency</div>
                        </div>
                        <div class="metric">
                            <div class="metric-value" id="time">-</div>
                            <div class="metric-label">Time Saved</div>
                        </div>
                    </div>

                    <h4 style="margin-top: 20px;">Integrated Systems</h4>
                    <div class="systems" id="systems">
                        {{systems_badges}}
                    </div>

                    <h4 style="margin-top: 20px;">Benefits</h4>
                    <ul id="benefits">
                        {{benefits_items}}
                    </ul>
                </div>
            </div>
        </div>
    </div>

    <script>
        let currentMode = 'demo';

        function setMode(mode) {
            currentMode = mode;
            document.querySelectorAll('.mode-btn').forEach(btn => {
                btn.classList.remove('active');
            });
            event.target.classList.add('active');
        }

        function executeAgent() {
            const results = document.getElementById('results');
            results.classList.add('active');

            // Simulate results
            document.getElementById('processed').textContent = Math.floor(Math.random() * 90) + 10;
            document.getElementById('efficiency').textContent = Math.floor(Math.random() * 30) + 70 + '%';
            document.getElementById('time').textContent = Math.floor(Math.random() * 35) + 5 + ' hours';
        }
    </script>
</body>
</html>"#;

/// Emit the form-variant demo page for one descriptor.
pub fn emit_form_demo(descriptor: &AgentDescriptor) -> Result<String> {
    let badges = descriptor
        .systems
        .iter()
        .map(|system| format!(r#"<span class="system-badge">{}</span>"#, escape_html(system)))
        .collect::<Vec<_>>()
        .join(" ");

    let benefits = descriptor
        .benefits
        .iter()
        .map(|benefit| format!("<li>{}</li>", escape_html(benefit)))
        .collect::<Vec<_>>()
        .join("");

    render(
        FORM_TEMPLATE,
        &[
            ("display_name", &escape_html(&descriptor.display_name)),
            ("description", &escape_html(&descriptor.description)),
            ("systems_badges", &badges),
            ("benefits_items", &benefits),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor() -> AgentDescriptor {
        AgentDescriptor {
            name: "care_gap_closure".to_string(),
            display_name: "Care Gap Closure Agent".to_string(),
            description: "Identifies missing screenings and automates patient outreach"
                .to_string(),
            emoji: "🎯".to_string(),
            systems: vec!["EHR".to_string(), "CRM".to_string()],
            benefits: vec![
                "Improves quality scores".to_string(),
                "Reduces readmission rates".to_string(),
            ],
            use_cases: vec!["Preventive care reminders".to_string()],
        }
    }

    #[test]
    fn page_is_standalone_html() {
        let page = emit_form_demo(&descriptor()).unwrap();
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.ends_with("</html>"));
        assert!(!page.contains("{{"));
    }

    #[test]
    fn descriptor_text_is_rendered() {
        let page = emit_form_demo(&descriptor()).unwrap();
        assert!(page.contains("<title>Care Gap Closure Agent - Interactive Demo</title>"));
        assert!(page.contains("Identifies missing screenings"));
    }

    #[test]
    fn systems_render_as_badges_in_order() {
        let page = emit_form_demo(&descriptor()).unwrap();
        let ehr = page.find(r#"<span class="system-badge">EHR</span>"#).unwrap();
        let crm = page.find(r#"<span class="system-badge">CRM</span>"#).unwrap();
        assert!(ehr < crm);
    }

    #[test]
    fn benefits_render_as_list_items() {
        let page = emit_form_demo(&descriptor()).unwrap();
        assert!(page.contains("<li>Improves quality scores</li>"));
        assert!(page.contains("<li>Reduces readmission rates</li>"));
    }

    #[test]
    fn form_offers_the_four_actions() {
        let page = emit_form_demo(&descriptor()).unwrap();
        for action in crate::emit::code_stub::ACTIONS {
            assert!(page.contains(&format!("<option value=\"{}\"", action)));
        }
    }

    #[test]
    fn markup_characters_are_escaped() {
        let mut d = descriptor();
        d.systems = vec!["D365 F&O".to_string()];
        let page = emit_form_demo(&d).unwrap();
        assert!(page.contains(r#"<span class="system-badge">D365 F&amp;O</span>"#));
    }

    #[test]
    fn emission_is_deterministic() {
        let d = descriptor();
        assert_eq!(emit_form_demo(&d).unwrap(), emit_form_demo(&d).unwrap());
    }
}
