//! Mapping from remote service records to ad records
//!
//! Pure functions, no I/O. Unknown color tokens and unknown service ids map to
//! [`DEFAULT_ACCENT`] and [`DEFAULT_ICON`] instead of failing.

use super::{AccentColor, AdRecord, ServiceRecord};

/// Accent used when a color token is not in the table
pub const DEFAULT_ACCENT: AccentColor = AccentColor::Blue;

/// Icon used when a service id is not in the table
pub const DEFAULT_ICON: &str = "sparkles";

/// Color token -> accent palette entry
const ACCENT_TABLE: &[(&str, AccentColor)] = &[
    ("blue", AccentColor::Blue),
    ("cyan", AccentColor::Blue),
    ("purple", AccentColor::Purple),
    ("violet", AccentColor::Purple),
    ("green", AccentColor::Green),
    ("emerald", AccentColor::Green),
    ("orange", AccentColor::Orange),
    ("amber", AccentColor::Orange),
];

/// Service id -> icon name
const ICON_TABLE: &[(&str, &str)] = &[
    ("web-development", "globe"),
    ("mobile-apps", "smartphone"),
    ("ai-automation", "cpu"),
    ("consulting", "briefcase"),
];

/// Looks up the accent for a remote color token
pub fn accent_for_token(token: &str) -> AccentColor {
    ACCENT_TABLE
        .iter()
        .find(|(name, _)| *name == token)
        .map(|(_, accent)| *accent)
        .unwrap_or(DEFAULT_ACCENT)
}

/// Looks up the icon for a service id
pub fn icon_for_service(service_id: &str) -> &'static str {
    ICON_TABLE
        .iter()
        .find(|(id, _)| *id == service_id)
        .map(|(_, icon)| *icon)
        .unwrap_or(DEFAULT_ICON)
}

/// Builds an [`AdRecord`] from one service record
///
/// `cta_url` is the intake base URL followed by the record's relative path,
/// joined as plain strings. A path without a leading `/` yields a malformed URL;
/// it is not corrected here.
pub fn to_ad_record(service: &ServiceRecord, intake_base_url: &str) -> AdRecord {
    AdRecord {
        id: service.id.clone(),
        title: service.title.clone(),
        tagline: service.tagline.clone(),
        description: service.description.clone(),
        cta_text: service.primary_cta_label.clone(),
        cta_url: format!("{}{}", intake_base_url, service.intake_url),
        icon: icon_for_service(&service.id).to_string(),
        accent_color: accent_for_token(&service.accent),
        features: service.features.clone().unwrap_or_default(),
    }
}

/// Maps every service record to an ad record, preserving order
pub fn transform_services(services: &[ServiceRecord], intake_base_url: &str) -> Vec<AdRecord> {
    services
        .iter()
        .map(|service| to_ad_record(service, intake_base_url))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(id: &str, accent: &str, intake_url: &str) -> ServiceRecord {
        ServiceRecord {
            id: id.to_string(),
            title: format!("{} title", id),
            tagline: "tagline".to_string(),
            description: "description".to_string(),
            features: None,
            primary_cta_label: "Get started".to_string(),
            primary_cta_id: None,
            intake_url: intake_url.to_string(),
            accent: accent.to_string(),
        }
    }

    #[test]
    fn test_known_tokens_map_to_palette() {
        assert_eq!(accent_for_token("violet"), AccentColor::Purple);
        assert_eq!(accent_for_token("emerald"), AccentColor::Green);
        assert_eq!(accent_for_token("amber"), AccentColor::Orange);
        assert_eq!(accent_for_token("blue"), AccentColor::Blue);
    }

    #[test]
    fn test_unknown_token_maps_to_default_accent() {
        assert_eq!(accent_for_token("magenta"), DEFAULT_ACCENT);
        assert_eq!(accent_for_token(""), DEFAULT_ACCENT);
    }

    #[test]
    fn test_unknown_service_maps_to_default_icon() {
        assert_eq!(icon_for_service("mobile-apps"), "smartphone");
        assert_eq!(icon_for_service("underwater-basket-weaving"), DEFAULT_ICON);
    }

    #[test]
    fn test_cta_url_is_plain_concatenation() {
        let ad = to_ad_record(&service("consulting", "amber", "/intake/consulting"), "https://x.io");
        assert_eq!(ad.cta_url, "https://x.io/intake/consulting");

        // No separator is inserted
        let ad = to_ad_record(&service("consulting", "amber", "intake"), "https://x.io");
        assert_eq!(ad.cta_url, "https://x.iointake");
    }

    #[test]
    fn test_fields_are_renamed() {
        let mut record = service("ai-automation", "cyan", "/ai");
        record.features = Some(vec!["Agents".to_string(), "Pipelines".to_string()]);

        let ad = to_ad_record(&record, "https://adkit.dev");

        assert_eq!(ad.id, "ai-automation");
        assert_eq!(ad.cta_text, "Get started");
        assert_eq!(ad.icon, "cpu");
        assert_eq!(ad.accent_color, AccentColor::Blue);
        assert_eq!(ad.features, vec!["Agents", "Pipelines"]);
    }

    #[test]
    fn test_transform_preserves_order() {
        let services = vec![
            service("b", "green", "/b"),
            service("a", "green", "/a"),
            service("c", "green", "/c"),
        ];

        let ids: Vec<String> = transform_services(&services, "https://h")
            .into_iter()
            .map(|ad| ad.id)
            .collect();

        assert_eq!(ids, vec!["b", "a", "c"]);
    }
}
