//! Per-vertical seed data: tenant settings, default services and FAQs.

use crate::config::ProvisioningConfig;
use crate::model::TenantSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceTemplate {
    pub name: &'static str,
    pub duration_minutes: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaqTemplate {
    pub question: &'static str,
    pub answer: &'static str,
    pub category: &'static str,
}

#[derive(Debug, PartialEq, Eq)]
pub struct VerticalDefaults {
    pub vertical: &'static str,
    pub display_name: &'static str,
    pub services: &'static [ServiceTemplate],
    pub sidebar: &'static [&'static str],
    pub faqs: &'static [FaqTemplate],
}

impl VerticalDefaults {
    /// Tenant settings for this vertical in the configured region.
    pub fn settings(&self, config: &ProvisioningConfig) -> TenantSettings {
        TenantSettings {
            timezone: config.timezone.clone(),
            locale: config.locale.clone(),
            currency: config.currency.clone(),
            sidebar: self.sidebar.iter().map(|s| s.to_string()).collect(),
        }
    }
}

const fn service(name: &'static str, duration_minutes: u32) -> ServiceTemplate {
    ServiceTemplate {
        name,
        duration_minutes,
    }
}

const fn faq(question: &'static str, answer: &'static str, category: &'static str) -> FaqTemplate {
    FaqTemplate {
        question,
        answer,
        category,
    }
}

pub static DENTAL: VerticalDefaults = VerticalDefaults {
    vertical: "dental",
    display_name: "Clínica Dental",
    services: &[
        service("Limpieza dental", 45),
        service("Consulta general", 30),
        service("Blanqueamiento", 60),
        service("Extracción", 45),
        service("Ortodoncia (valoración)", 30),
    ],
    sidebar: &["dashboard", "agenda", "pacientes", "servicios", "conversaciones", "reportes", "configuracion"],
    faqs: &[
        faq(
            "¿Cuál es el horario de atención?",
            "Atendemos de lunes a viernes de 9:00 a 19:00 y sábados de 9:00 a 14:00.",
            "horarios",
        ),
        faq(
            "¿Aceptan seguros dentales?",
            "Sí, trabajamos con las principales aseguradoras. Pregúntanos por la tuya.",
            "pagos",
        ),
        faq(
            "¿Cómo agendo una cita?",
            "Puedes agendar por WhatsApp, por teléfono o desde nuestra página web.",
            "citas",
        ),
        faq(
            "¿Qué hago en caso de urgencia?",
            "Escríbenos por WhatsApp y te daremos la primera cita disponible del día.",
            "citas",
        ),
    ],
};

pub static RESTAURANT: VerticalDefaults = VerticalDefaults {
    vertical: "restaurant",
    display_name: "Restaurante",
    services: &[
        service("Reservación de mesa", 90),
        service("Evento privado", 240),
        service("Pedido para llevar", 20),
    ],
    sidebar: &["dashboard", "reservaciones", "menu", "pedidos", "conversaciones", "reportes", "configuracion"],
    faqs: &[
        faq(
            "¿Cuál es el horario?",
            "Abrimos todos los días de 13:00 a 23:00.",
            "horarios",
        ),
        faq(
            "¿Aceptan reservaciones?",
            "Sí, puedes reservar por WhatsApp o por teléfono con al menos 2 horas de anticipación.",
            "reservaciones",
        ),
        faq(
            "¿Tienen opciones vegetarianas?",
            "Sí, nuestro menú incluye platillos vegetarianos y veganos.",
            "menu",
        ),
        faq(
            "¿Hacen entregas a domicilio?",
            "Sí, a través de nuestras plataformas de entrega y pedidos directos por WhatsApp.",
            "pedidos",
        ),
    ],
};

static ALL: [&VerticalDefaults; 2] = [&DENTAL, &RESTAURANT];

/// Defaults of `vertical`, if it has its own table.
pub fn lookup(vertical: &str) -> Option<&'static VerticalDefaults> {
    ALL.iter().copied().find(|d| d.vertical == vertical)
}

/// Defaults of `vertical`, else those of `fallback`, else dental.
pub fn defaults_for(vertical: &str, fallback: &str) -> &'static VerticalDefaults {
    lookup(vertical).or_else(|| lookup(fallback)).unwrap_or(&DENTAL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_verticals() {
        assert_eq!(defaults_for("restaurant", "dental").display_name, "Restaurante");
        assert_eq!(defaults_for("dental", "restaurant").services.len(), 5);
    }

    #[test]
    fn test_unknown_vertical_falls_back() {
        assert_eq!(defaults_for("spa", "restaurant").vertical, "restaurant");
        assert_eq!(defaults_for("spa", "bakery").vertical, "dental");
    }

    #[test]
    fn test_settings_use_region_config() {
        let settings = RESTAURANT.settings(&ProvisioningConfig::default());
        assert_eq!(settings.currency, "MXN");
        assert_eq!(settings.sidebar[1], "reservaciones");
    }
}
