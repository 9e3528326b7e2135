use chrono::{Datelike, Utc};
use serde_json::{json, Map, Value};

use crate::knowledge::{IndustryProfile, KnowledgeBase};
use crate::registry::SchemaRegistry;
use crate::wire::{GeneratedWebsite, GenerationParams, Section, SiteMetadata};

pub const FALLBACK_BACKEND: &str = "template-fallback";

/// Deterministic page used whenever no backend is configured, the chosen
/// backend's call failed at the transport layer, or its response hard-failed
/// extraction. Pure function: no network, cannot fail.
pub fn build_fallback(
    params: &GenerationParams,
    registry: &SchemaRegistry,
    kb: &KnowledgeBase,
) -> GeneratedWebsite {
    let profile = kb.get(&params.industry);
    let name = if params.website_name.is_empty() {
        profile.display_name.to_string()
    } else {
        params.website_name.clone()
    };

    let mut sections = vec![
        header_section(registry, profile, &name),
        hero_section(registry, profile, &name),
        about_section(registry, params, profile, &name),
        services_section(registry, profile),
    ];
    for &tpl in industry_extras(profile.key) {
        sections.push(extra_section(registry, kb, params, profile, tpl));
    }
    sections.push(contact_section(registry, &name));
    sections.push(footer_section(registry, profile, &name));

    let components_used = sections.len();
    GeneratedWebsite {
        success: true,
        sections,
        metadata: SiteMetadata {
            title: format!("{} | {}", name, profile.taglines[0]),
            description: if params.description.is_empty() {
                profile.taglines[0].to_string()
            } else {
                params.description.clone()
            },
            keywords: vec![profile.key.to_string(), params.style.clone(), name],
            industry: profile.key.to_string(),
            style: params.style.clone(),
            components_used,
        },
        colors: kb.palette(&params.industry, &params.style),
        generated_at: Utc::now(),
        generated_by: FALLBACK_BACKEND.to_string(),
        message: None,
    }
}

/// One or two vertical-specific sections, inserted between services and
/// contact. Unrecognized keys take the technology pair.
fn industry_extras(key: &str) -> &'static [&'static str] {
    match key {
        "restaurant" => &["MenuSection", "TestimonialCarousel"],
        "fitness" => &["ScheduleSection", "PricingTable"],
        "healthcare" => &["AppointmentBooking", "TeamSection"],
        "education" => &["CourseCatalog", "StatsStrip"],
        "realestate" => &["PropertyListings", "StatsStrip"],
        "ecommerce" => &["ProductShowcase", "NewsletterSignup"],
        "hospitality" => &["RoomShowcase", "GalleryGrid"],
        _ => &["FeatureGrid", "StatsStrip"],
    }
}

fn section(registry: &SchemaRegistry, template: &str, overrides: Vec<(&str, Value)>) -> Section {
    let (component, mut props) = match registry.get(template) {
        Some(s) => (s.template_name.to_string(), s.default_props.clone()),
        None => (template.to_string(), Map::new()),
    };
    for (k, v) in overrides {
        props.insert(k.to_string(), v);
    }
    Section {
        component,
        variant: "default".into(),
        props,
    }
}

fn pick_template(profile: &IndustryProfile, needle: &str, default: &'static str) -> String {
    profile
        .required_components
        .iter()
        .find(|t| t.to_lowercase().contains(needle))
        .map(|t| t.to_string())
        .unwrap_or_else(|| default.to_string())
}

fn header_section(registry: &SchemaRegistry, profile: &IndustryProfile, name: &str) -> Section {
    let template = pick_template(profile, "header", "ModernHeader");
    section(
        registry,
        &template,
        vec![
            ("logo", json!(name)),
            ("tagline", json!(profile.taglines[0])),
        ],
    )
}

fn hero_section(registry: &SchemaRegistry, profile: &IndustryProfile, name: &str) -> Section {
    let image = profile.image_pool.first().copied().unwrap_or("");
    section(
        registry,
        "HeroBanner",
        vec![
            ("title", json!(profile.hero_titles[0])),
            ("subtitle", json!(format!("{}: {}", name, profile.taglines[0]))),
            ("image", json!(image)),
            ("ctaText", json!("Get in Touch")),
            ("ctaLink", json!("#contact")),
        ],
    )
}

fn about_section(
    registry: &SchemaRegistry,
    params: &GenerationParams,
    profile: &IndustryProfile,
    name: &str,
) -> Section {
    let content = if params.description.is_empty() {
        profile.taglines[0].to_string()
    } else {
        params.description.clone()
    };
    let image = profile.image_pool.last().copied().unwrap_or("");
    section(
        registry,
        "AboutSection",
        vec![
            ("title", json!(format!("About {name}"))),
            ("content", json!(content)),
            ("image", json!(image)),
        ],
    )
}

fn services_section(registry: &SchemaRegistry, profile: &IndustryProfile) -> Section {
    let services: Vec<Value> = profile
        .services
        .iter()
        .map(|(t, d)| json!({ "title": t, "description": d }))
        .collect();
    section(registry, "ServicesGrid", vec![("services", Value::Array(services))])
}

fn extra_section(
    registry: &SchemaRegistry,
    kb: &KnowledgeBase,
    params: &GenerationParams,
    profile: &IndustryProfile,
    template: &str,
) -> Section {
    let mut overrides: Vec<(&str, Value)> = Vec::new();
    if let Some((title, subtitle)) = kb.section_copy(profile.key, template) {
        overrides.push(("title", json!(title)));
        overrides.push(("subtitle", json!(subtitle)));
    }
    match template {
        "TestimonialCarousel" => {
            let testimonials: Vec<Value> = profile
                .testimonials
                .iter()
                .map(|(name, role, quote)| {
                    json!({
                        "name": name, "role": role, "content": quote,
                        "rating": 5, "image": "", "company": ""
                    })
                })
                .collect();
            overrides.push(("testimonials", Value::Array(testimonials)));
        }
        "FeatureGrid" => {
            let features: Vec<Value> = profile
                .features
                .iter()
                .map(|(t, d)| json!({ "title": t, "description": d }))
                .collect();
            overrides.push(("features", Value::Array(features)));
        }
        "GalleryGrid" => {
            let images: Vec<Value> = profile.image_pool.iter().map(|u| json!(u)).collect();
            overrides.push(("images", Value::Array(images)));
        }
        _ => {
            if kb.section_copy(profile.key, template).is_none() {
                let (title, subtitle) =
                    kb.generic_copy(template, &params.website_name, &params.industry);
                overrides.push(("title", json!(title)));
                overrides.push(("subtitle", json!(subtitle)));
            }
        }
    }
    section(registry, template, overrides)
}

fn contact_section(registry: &SchemaRegistry, name: &str) -> Section {
    section(
        registry,
        "ContactForm",
        vec![("title", json!(format!("Contact {name}")))],
    )
}

fn footer_section(registry: &SchemaRegistry, profile: &IndustryProfile, name: &str) -> Section {
    let template = pick_template(profile, "footer", "SimpleFooter");
    section(
        registry,
        &template,
        vec![
            ("logo", json!(name)),
            (
                "copyright",
                json!(format!("© {} {}. All rights reserved.", Utc::now().year(), name)),
            ),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(industry: &str) -> GenerationParams {
        GenerationParams {
            website_name: "Luigi's".into(),
            industry: industry.into(),
            description: "A cozy Italian bistro".into(),
            style: "classic".into(),
            target_audience: "families".into(),
            goals: vec![],
            unique_selling_points: vec![],
            component_count: 10,
        }
    }

    fn build(industry: &str) -> GeneratedWebsite {
        build_fallback(&params(industry), &SchemaRegistry::new(), &KnowledgeBase::new())
    }

    fn position(site: &GeneratedWebsite, template: &str) -> usize {
        site.sections
            .iter()
            .position(|s| s.component == template)
            .unwrap_or_else(|| panic!("{template} missing from fallback"))
    }

    #[test]
    fn restaurant_fallback_has_the_expected_shell_in_order() {
        let site = build("restaurant");
        assert!(site.success);
        assert_eq!(site.generated_by, FALLBACK_BACKEND);

        let header = position(&site, "ClassicHeader");
        let hero = position(&site, "HeroBanner");
        let about = position(&site, "AboutSection");
        let services = position(&site, "ServicesGrid");
        let menu = position(&site, "MenuSection");
        let contact = position(&site, "ContactForm");
        let footer = position(&site, "SimpleFooter");

        assert!(header < hero && hero < about && about < services);
        assert!(services < menu && menu < contact && contact < footer);
        assert_eq!(footer, site.sections.len() - 1);
    }

    #[test]
    fn every_fallback_type_resolves_and_count_matches() {
        let registry = SchemaRegistry::new();
        for industry in ["restaurant", "technology", "fitness", "healthcare", "ecommerce", "education", "hospitality", "realestate", "no-such-industry"] {
            let site = build(industry);
            assert_eq!(site.metadata.components_used, site.sections.len());
            for s in &site.sections {
                assert!(registry.get(&s.component).is_some(), "orphaned type {}", s.component);
            }
        }
    }

    #[test]
    fn unknown_industry_uses_technology_extras() {
        let site = build("no-such-industry");
        assert!(site.sections.iter().any(|s| s.component == "FeatureGrid"));
        assert!(site.sections.iter().any(|s| s.component == "StatsStrip"));
        assert_eq!(site.metadata.industry, "technology");
    }

    #[test]
    fn props_are_populated_from_params_and_profile() {
        let site = build("restaurant");
        let header = &site.sections[position(&site, "ClassicHeader")];
        assert_eq!(header.props["logo"], json!("Luigi's"));
        let about = &site.sections[position(&site, "AboutSection")];
        assert_eq!(about.props["content"], json!("A cozy Italian bistro"));
        let menu = &site.sections[position(&site, "MenuSection")];
        assert_eq!(menu.props["title"], json!("Our Menu"));
        let testimonials = &site.sections[position(&site, "TestimonialCarousel")];
        let list = testimonials.props["testimonials"].as_array().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0]["rating"], json!(5));
    }

    #[test]
    fn palette_comes_from_the_industry_table() {
        let site = build("restaurant");
        let kb = KnowledgeBase::new();
        assert_eq!(site.colors, kb.palette("restaurant", "classic"));
    }
}
