//! Bundled ads served when neither the cache nor the network has content
//!
//! These are compiled into the binary, so the presentation layer always has
//! something to render.

use super::{AccentColor, AdRecord};
use crate::config::DEFAULT_INTAKE_BASE_URL;

/// Returns the four bundled fallback ads
///
/// URLs are built on the default intake base so they stay absolute regardless
/// of runtime configuration.
pub fn fallback_ads() -> Vec<AdRecord> {
    vec![
        AdRecord {
            id: "web-development".to_string(),
            title: "Web Development".to_string(),
            tagline: "Fast, accessible sites that convert".to_string(),
            description: "From landing pages to full web platforms, built for speed and search."
                .to_string(),
            cta_text: "Start a project".to_string(),
            cta_url: format!("{}/intake/web-development", DEFAULT_INTAKE_BASE_URL),
            icon: "globe".to_string(),
            accent_color: AccentColor::Blue,
            features: vec![
                "Responsive design".to_string(),
                "SEO ready".to_string(),
                "Analytics built in".to_string(),
            ],
        },
        AdRecord {
            id: "mobile-apps".to_string(),
            title: "Mobile Apps".to_string(),
            tagline: "Native feel on every device".to_string(),
            description: "iOS and Android apps designed, built, and shipped to the stores."
                .to_string(),
            cta_text: "Plan your app".to_string(),
            cta_url: format!("{}/intake/mobile-apps", DEFAULT_INTAKE_BASE_URL),
            icon: "smartphone".to_string(),
            accent_color: AccentColor::Purple,
            features: vec![
                "iOS and Android".to_string(),
                "Offline support".to_string(),
                "Push notifications".to_string(),
            ],
        },
        AdRecord {
            id: "ai-automation".to_string(),
            title: "AI Automation".to_string(),
            tagline: "Put repetitive work on autopilot".to_string(),
            description: "Assistants and workflows that plug into the tools you already use."
                .to_string(),
            cta_text: "Automate now".to_string(),
            cta_url: format!("{}/intake/ai-automation", DEFAULT_INTAKE_BASE_URL),
            icon: "cpu".to_string(),
            accent_color: AccentColor::Green,
            features: vec![
                "Custom assistants".to_string(),
                "Workflow integration".to_string(),
            ],
        },
        AdRecord {
            id: "consulting".to_string(),
            title: "Technical Consulting".to_string(),
            tagline: "Senior advice, on demand".to_string(),
            description: "Architecture reviews, audits, and roadmaps for growing teams."
                .to_string(),
            cta_text: "Book a call".to_string(),
            cta_url: format!("{}/intake/consulting", DEFAULT_INTAKE_BASE_URL),
            icon: "briefcase".to_string(),
            accent_color: AccentColor::Orange,
            features: Vec::new(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::is_absolute_url;
    use std::collections::HashSet;

    #[test]
    fn test_fallback_has_four_unique_ads() {
        let ads = fallback_ads();
        assert_eq!(ads.len(), 4);

        let ids: HashSet<&str> = ads.iter().map(|ad| ad.id.as_str()).collect();
        assert_eq!(ids.len(), 4, "Fallback ids should be unique");
    }

    #[test]
    fn test_fallback_urls_are_absolute() {
        for ad in fallback_ads() {
            assert!(is_absolute_url(&ad.cta_url), "{} is not absolute", ad.cta_url);
        }
    }
}
