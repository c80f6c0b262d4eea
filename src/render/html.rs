//! HTML fragments for the browser dashboard

use std::fmt::Write;

use super::{Renderer, REPORTED_AT_FORMAT};
use crate::models::{priority_label, type_label, Incident, IntakeForm};
use crate::tracker::DashboardSnapshot;

/// Renders dashboard fragments as HTML. All free text is escaped.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRenderer;

impl HtmlRenderer {
    fn incident_item(incident: &Incident) -> String {
        format!(
            concat!(
                "<div class=\"emergency-item status-{status}\">\n",
                "  <h3>{kind}</h3>\n",
                "  <p><strong>Ubicación:</strong> {location}</p>\n",
                "  <p><strong>Descripción:</strong> {description}</p>\n",
                "  <p><strong>Prioridad:</strong> {priority}</p>\n",
                "  <p><strong>Reportado:</strong> {reported}</p>\n",
                "  <button data-id=\"{id}\" class=\"resolveButton\">Marcar como Resuelto</button>\n",
                "</div>\n"
            ),
            status = incident.status,
            kind = escape(incident.emergency_type.label()),
            location = escape(&incident.location),
            description = escape(&incident.description),
            priority = escape(incident.priority.label()),
            reported = incident.created_at.format(REPORTED_AT_FORMAT),
            id = incident.id,
        )
    }
}

impl Renderer for HtmlRenderer {
    fn dashboard(&self, snapshot: &DashboardSnapshot) -> String {
        format!(
            concat!(
                "<span id=\"activeEmergencies\">{}</span>\n",
                "<span id=\"availableResources\">{}</span>\n",
                "<span id=\"averageResponse\">{} min</span>\n"
            ),
            snapshot.active_emergencies, snapshot.available_resources, snapshot.average_response
        )
    }

    fn incident_list(&self, incidents: &[Incident]) -> String {
        let mut out = String::from("<div id=\"emergencyList\">\n");
        for incident in incidents {
            out.push_str(&Self::incident_item(incident));
        }
        out.push_str("</div>\n");
        out
    }

    fn form(&self, form: &IntakeForm) -> String {
        let mut out = String::from(
            "<div id=\"emergencyFormContainer\" style=\"display: block\">\n<form id=\"emergencyForm\">\n",
        );
        // Writing to a String cannot fail
        let _ = writeln!(
            out,
            "  <input id=\"type\" type=\"hidden\" value=\"{}\"> <!-- {} -->",
            escape(&form.emergency_type),
            escape(&type_label(&form.emergency_type))
        );
        let _ = writeln!(
            out,
            "  <input id=\"location\" value=\"{}\">",
            escape(&form.location)
        );
        let _ = writeln!(
            out,
            "  <textarea id=\"description\">{}</textarea>",
            escape(&form.description)
        );
        let _ = writeln!(
            out,
            "  <select id=\"priority\" data-selected=\"{}\">{}</select>",
            escape(&form.priority),
            escape(&priority_label(&form.priority))
        );
        out.push_str("</form>\n</div>\n");
        out
    }

    fn form_cleared(&self) -> String {
        "<div id=\"emergencyFormContainer\" style=\"display: none\"></div>\n".to_string()
    }

    fn warning(&self, message: &str) -> String {
        format!("<div class=\"alert\" role=\"alert\">{}</div>\n", escape(message))
    }

    fn session_reset(&self) -> String {
        "<!-- session reset -->\n".to_string()
    }
}

/// Escape text for use in element content and quoted attributes
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EmergencyType, Priority};

    fn incident() -> Incident {
        Incident::new(
            EmergencyType::Fire,
            "Main St".to_string(),
            "<script>alert(1)</script>".to_string(),
            Priority::High,
        )
    }

    #[test]
    fn test_dashboard_counters() {
        let html = HtmlRenderer.dashboard(&DashboardSnapshot {
            active_emergencies: 1,
            available_resources: 75,
            average_response: 5,
        });

        assert!(html.contains("<span id=\"activeEmergencies\">1</span>"));
        assert!(html.contains("<span id=\"availableResources\">75</span>"));
        assert!(html.contains("<span id=\"averageResponse\">5 min</span>"));
    }

    #[test]
    fn test_list_item_markup() {
        let incident = incident();
        let html = HtmlRenderer.incident_list(std::slice::from_ref(&incident));

        assert!(html.contains("class=\"emergency-item status-active\""));
        assert!(html.contains("<h3>Incendio</h3>"));
        assert!(html.contains("<strong>Prioridad:</strong> Alta"));
        assert!(html.contains(">Marcar como Resuelto</button>"));
        assert!(html.contains(&format!("data-id=\"{}\"", incident.id)));
    }

    #[test]
    fn test_free_text_is_escaped() {
        let html = HtmlRenderer.incident_list(&[incident()]);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    }

    #[test]
    fn test_form_prefill() {
        let html = HtmlRenderer.form(&IntakeForm::new("medical", "Ward \"B\"", "", "low"));
        assert!(html.contains("value=\"medical\""));
        assert!(html.contains("Emergencia Médica"));
        assert!(html.contains("value=\"Ward &quot;B&quot;\""));
        assert!(html.contains("data-selected=\"low\">Baja"));
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("a & b's"), "a &amp; b&#39;s");
    }
}
