use super::{Renderer, REPORTED_AT_FORMAT};
use crate::models::{priority_label, type_label, Incident, IntakeForm};
use crate::tracker::DashboardSnapshot;

/// Plain terminal output
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer;

impl Renderer for TextRenderer {
    fn dashboard(&self, snapshot: &DashboardSnapshot) -> String {
        format!(
            "Emergencias activas: {} | Recursos disponibles: {} | Tiempo de respuesta: {} min\n",
            snapshot.active_emergencies, snapshot.available_resources, snapshot.average_response
        )
    }

    fn incident_list(&self, incidents: &[Incident]) -> String {
        if incidents.is_empty() {
            return "No hay emergencias registradas.\n".to_string();
        }

        incidents
            .iter()
            .map(|incident| {
                format!(
                    "[{}] {} ({})\n  Ubicación: {}\n  Descripción: {}\n  Prioridad: {}\n  Reportado: {}\n  Id: {}\n",
                    incident.status,
                    incident.emergency_type.label(),
                    incident.emergency_type,
                    incident.location,
                    incident.description,
                    incident.priority.label(),
                    incident.created_at.format(REPORTED_AT_FORMAT),
                    incident.id,
                )
            })
            .collect()
    }

    fn form(&self, form: &IntakeForm) -> String {
        format!(
            "Formulario de emergencia\n  Tipo: {}\n  Ubicación: {}\n  Descripción: {}\n  Prioridad: {}\n",
            type_label(&form.emergency_type),
            form.location,
            form.description,
            priority_label(&form.priority),
        )
    }

    fn form_cleared(&self) -> String {
        "Formulario cerrado.\n".to_string()
    }

    fn warning(&self, message: &str) -> String {
        format!("WARNING: {}\n", message)
    }

    fn session_reset(&self) -> String {
        "Sesión reiniciada.\n".to_string()
    }
}
