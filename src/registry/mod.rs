use serde_json::{json, Map, Value};

/// Type hint for a single prop, used by the repair pipeline when coercing
/// primitive values the model sends in the wrong shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropKind {
    Text,
    Number,
    Boolean,
    List,
    Object,
}

/// Describes one renderable section type. `template_name` is the logical name
/// the AI and the matcher use; `component_name` is what the renderer's
/// dispatch table recognizes (cross-module contract, not enforced here).
#[derive(Debug, Clone)]
pub struct ComponentSchema {
    pub template_name: &'static str,
    pub component_name: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    /// Industry keys, or the sentinel "all".
    pub industries: &'static [&'static str],
    pub prop_types: &'static [(&'static str, PropKind)],
    pub default_props: Map<String, Value>,
}

impl ComponentSchema {
    pub fn prop_kind(&self, name: &str) -> Option<PropKind> {
        self.prop_types
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, k)| *k)
    }

    pub fn applies_to(&self, industry: &str) -> bool {
        self.industries.iter().any(|i| *i == "all" || i.eq_ignore_ascii_case(industry))
    }

    pub fn lists_all(&self) -> bool {
        self.industries.contains(&"all")
    }
}

/// Static catalog of section templates, loaded once and read-only after.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    schemas: Vec<ComponentSchema>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self { schemas: catalog() }
    }

    #[cfg(test)]
    pub(crate) fn empty() -> Self {
        Self { schemas: Vec::new() }
    }

    /// Lookup by template name, falling back to the renderer-facing component
    /// name (a section's `type` may carry either).
    pub fn get(&self, name: &str) -> Option<&ComponentSchema> {
        self.schemas
            .iter()
            .find(|s| s.template_name.eq_ignore_ascii_case(name))
            .or_else(|| {
                self.schemas
                    .iter()
                    .find(|s| s.component_name.eq_ignore_ascii_case(name))
            })
    }

    pub fn for_industry(&self, key: &str) -> Vec<&ComponentSchema> {
        self.schemas.iter().filter(|s| s.applies_to(key)).collect()
    }

    pub fn all(&self) -> &[ComponentSchema] {
        &self.schemas
    }
}

fn schema(
    template_name: &'static str,
    component_name: &'static str,
    description: &'static str,
    category: &'static str,
    industries: &'static [&'static str],
    prop_types: &'static [(&'static str, PropKind)],
    defaults: Value,
) -> ComponentSchema {
    let default_props = match defaults {
        Value::Object(m) => m,
        _ => Map::new(),
    };
    ComponentSchema {
        template_name,
        component_name,
        description,
        category,
        industries,
        prop_types,
        default_props,
    }
}

fn catalog() -> Vec<ComponentSchema> {
    use PropKind::*;
    vec![
        schema(
            "ModernHeader", "ModernHeader",
            "Sticky top navigation with logo, links and a call-to-action button",
            "header", &["all"],
            &[("logo", Text), ("navigation", List), ("ctaText", Text), ("ctaLink", Text), ("sticky", Boolean)],
            json!({
                "logo": "Your Brand",
                "navigation": [
                    {"label": "Home", "href": "#home"},
                    {"label": "About", "href": "#about"},
                    {"label": "Services", "href": "#services"},
                    {"label": "Contact", "href": "#contact"}
                ],
                "ctaText": "Get Started",
                "ctaLink": "#contact",
                "sticky": true
            }),
        ),
        schema(
            "ClassicHeader", "ClassicHeader",
            "Centered logo over a horizontal menu, suited to traditional brands",
            "header", &["restaurant", "hospitality", "realestate"],
            &[("logo", Text), ("tagline", Text), ("navigation", List), ("phone", Text)],
            json!({
                "logo": "Your Brand",
                "tagline": "Est. 2010",
                "navigation": [
                    {"label": "Home", "href": "#home"},
                    {"label": "Menu", "href": "#menu"},
                    {"label": "Reservations", "href": "#contact"}
                ],
                "phone": "+1 (555) 010-0100"
            }),
        ),
        schema(
            "HeroBanner", "HeroBanner",
            "Full-width hero with headline, subheadline, background image and primary CTA",
            "hero", &["all"],
            &[("title", Text), ("subtitle", Text), ("image", Text), ("ctaText", Text), ("ctaLink", Text), ("overlay", Boolean)],
            json!({
                "title": "Welcome",
                "subtitle": "We are glad you are here",
                "image": "",
                "ctaText": "Learn More",
                "ctaLink": "#about",
                "overlay": true
            }),
        ),
        schema(
            "SplitHero", "SplitHero",
            "Two-column hero: copy and buttons on one side, product image on the other",
            "hero", &["technology", "ecommerce", "education"],
            &[("title", Text), ("subtitle", Text), ("image", Text), ("buttons", List), ("imagePosition", Text)],
            json!({
                "title": "Welcome",
                "subtitle": "A better way to work",
                "image": "",
                "buttons": [
                    {"label": "Get Started", "href": "#contact"},
                    {"label": "See Pricing", "href": "#pricing"}
                ],
                "imagePosition": "right"
            }),
        ),
        schema(
            "AboutSection", "AboutSection",
            "Story block with heading, rich paragraph and supporting image",
            "about", &["all"],
            &[("title", Text), ("content", Text), ("image", Text), ("yearsActive", Number)],
            json!({
                "title": "About Us",
                "content": "Our story begins with a simple idea: do the work well.",
                "image": "",
                "yearsActive": 10
            }),
        ),
        schema(
            "FeatureGrid", "FeatureGrid",
            "Grid of feature cards, each with icon, title and short description",
            "features", &["all"],
            &[("title", Text), ("subtitle", Text), ("features", List), ("columns", Number)],
            json!({
                "title": "Why Choose Us",
                "subtitle": "",
                "features": [
                    {"title": "Quality", "description": "We sweat the details.", "icon": "star"},
                    {"title": "Speed", "description": "Delivered when promised.", "icon": "zap"},
                    {"title": "Support", "description": "Real people, real answers.", "icon": "life-buoy"}
                ],
                "columns": 3
            }),
        ),
        schema(
            "ServicesGrid", "ServicesGrid",
            "Cards describing the services on offer, with optional links",
            "services", &["all"],
            &[("title", Text), ("subtitle", Text), ("services", List)],
            json!({
                "title": "Our Services",
                "subtitle": "What we can do for you",
                "services": [
                    {"title": "Consulting", "description": "Advice grounded in experience.", "icon": "compass"},
                    {"title": "Delivery", "description": "From plan to production.", "icon": "package"}
                ]
            }),
        ),
        schema(
            "MenuSection", "MenuSection",
            "Restaurant menu grouped by course, with names, descriptions and prices",
            "menu", &["restaurant", "hospitality"],
            &[("title", Text), ("subtitle", Text), ("items", List), ("currency", Text)],
            json!({
                "title": "Our Menu",
                "subtitle": "Changes with the seasons",
                "items": [
                    {"title": "House Bread", "description": "Baked every morning, olive oil and sea salt.", "price": 6},
                    {"title": "Market Salad", "description": "Whatever looked best at the market today.", "price": 12}
                ],
                "currency": "USD"
            }),
        ),
        schema(
            "TestimonialCarousel", "TestimonialCarousel",
            "Rotating customer quotes with name, role, rating and portrait",
            "testimonials", &["all"],
            &[("title", Text), ("testimonials", List), ("autoplay", Boolean)],
            json!({
                "title": "What People Say",
                "testimonials": [
                    {"name": "Alex Doe", "role": "Customer", "content": "Could not recommend more highly.", "rating": 5, "image": "", "company": ""}
                ],
                "autoplay": true
            }),
        ),
        schema(
            "PricingTable", "PricingTable",
            "Side-by-side plan comparison with price, period and feature lists",
            "pricing", &["technology", "fitness", "ecommerce", "education"],
            &[("title", Text), ("subtitle", Text), ("plans", List), ("currency", Text)],
            json!({
                "title": "Pricing",
                "subtitle": "Pick the plan that fits",
                "plans": [
                    {"title": "Starter", "description": "For individuals getting going.", "price": 0},
                    {"title": "Pro", "description": "For teams that need more.", "price": 29}
                ],
                "currency": "USD"
            }),
        ),
        schema(
            "GalleryGrid", "GalleryGrid",
            "Masonry image gallery with optional captions and lightbox",
            "gallery", &["restaurant", "realestate", "hospitality", "fitness"],
            &[("title", Text), ("images", List), ("columns", Number)],
            json!({
                "title": "Gallery",
                "images": [],
                "columns": 3
            }),
        ),
        schema(
            "TeamSection", "TeamSection",
            "Portrait cards for the people behind the business",
            "team", &["healthcare", "technology", "education", "realestate"],
            &[("title", Text), ("subtitle", Text), ("members", List)],
            json!({
                "title": "Meet the Team",
                "subtitle": "",
                "members": [
                    {"title": "Jordan Smith", "description": "Founder", "image": ""}
                ]
            }),
        ),
        schema(
            "ContactForm", "ContactForm",
            "Contact form with address block, map placeholder and business hours",
            "contact", &["all"],
            &[("title", Text), ("subtitle", Text), ("email", Text), ("phone", Text), ("address", Text), ("showMap", Boolean)],
            json!({
                "title": "Get in Touch",
                "subtitle": "We usually reply within one business day",
                "email": "hello@example.com",
                "phone": "+1 (555) 010-0100",
                "address": "100 Main Street",
                "showMap": false
            }),
        ),
        schema(
            "NewsletterSignup", "NewsletterSignup",
            "Single-field email capture with a short pitch",
            "newsletter", &["all"],
            &[("title", Text), ("subtitle", Text), ("buttonText", Text), ("placeholder", Text)],
            json!({
                "title": "Stay in the Loop",
                "subtitle": "One email a month, no noise",
                "buttonText": "Subscribe",
                "placeholder": "you@example.com"
            }),
        ),
        schema(
            "FaqAccordion", "FaqAccordion",
            "Collapsible frequently-asked-questions list",
            "faq", &["all"],
            &[("title", Text), ("items", List)],
            json!({
                "title": "Frequently Asked Questions",
                "items": [
                    {"title": "How do I get started?", "description": "Reach out through the contact form and we take it from there."}
                ]
            }),
        ),
        schema(
            "CtaBanner", "CtaBanner",
            "High-contrast strip with one message and one button",
            "cta", &["all"],
            &[("title", Text), ("subtitle", Text), ("ctaText", Text), ("ctaLink", Text)],
            json!({
                "title": "Ready when you are",
                "subtitle": "",
                "ctaText": "Contact Us",
                "ctaLink": "#contact"
            }),
        ),
        schema(
            "StatsStrip", "StatsStrip",
            "Row of headline numbers with labels",
            "stats", &["technology", "fitness", "education", "realestate"],
            &[("title", Text), ("stats", List)],
            json!({
                "title": "",
                "stats": [
                    {"title": "10k+", "description": "Happy customers"},
                    {"title": "99.9%", "description": "Uptime"},
                    {"title": "24/7", "description": "Support"}
                ]
            }),
        ),
        schema(
            "ScheduleSection", "ScheduleSection",
            "Weekly class or event timetable grouped by day",
            "schedule", &["fitness"],
            &[("title", Text), ("subtitle", Text), ("items", List)],
            json!({
                "title": "Weekly Schedule",
                "subtitle": "",
                "items": [
                    {"title": "Strength Basics", "description": "Mon & Wed, 6:00 PM"},
                    {"title": "Open Gym", "description": "Daily, 5:00 AM - 11:00 PM"}
                ]
            }),
        ),
        schema(
            "PropertyListings", "PropertyListings",
            "Cards for properties on the market: photo, price, beds and baths",
            "listings", &["realestate"],
            &[("title", Text), ("subtitle", Text), ("items", List), ("currency", Text)],
            json!({
                "title": "Current Listings",
                "subtitle": "",
                "items": [
                    {"title": "Sunny 2BR Apartment", "description": "Top floor, south-facing, near the park.", "price": 425000}
                ],
                "currency": "USD"
            }),
        ),
        schema(
            "CourseCatalog", "CourseCatalog",
            "Course cards with duration, level and enrollment links",
            "courses", &["education"],
            &[("title", Text), ("subtitle", Text), ("items", List)],
            json!({
                "title": "Courses",
                "subtitle": "",
                "items": [
                    {"title": "Intro to Data", "description": "Twelve weeks, evenings, no prerequisites."}
                ]
            }),
        ),
        schema(
            "AppointmentBooking", "AppointmentBooking",
            "Appointment request form with provider and time-slot pickers",
            "booking", &["healthcare", "fitness"],
            &[("title", Text), ("subtitle", Text), ("services", List), ("phone", Text)],
            json!({
                "title": "Book an Appointment",
                "subtitle": "Pick a time that works for you",
                "services": [
                    {"title": "General Consultation", "description": "30 minutes"}
                ],
                "phone": "+1 (555) 010-0100"
            }),
        ),
        schema(
            "ProductShowcase", "ProductShowcase",
            "Featured product cards with image, price and add-to-cart link",
            "products", &["ecommerce", "restaurant"],
            &[("title", Text), ("subtitle", Text), ("items", List), ("currency", Text)],
            json!({
                "title": "Featured Products",
                "subtitle": "",
                "items": [
                    {"title": "The Classic", "description": "Our best seller, year after year.", "price": 49}
                ],
                "currency": "USD"
            }),
        ),
        schema(
            "RoomShowcase", "RoomShowcase",
            "Room and suite cards with nightly rate and amenity list",
            "rooms", &["hospitality"],
            &[("title", Text), ("subtitle", Text), ("items", List), ("currency", Text)],
            json!({
                "title": "Rooms & Suites",
                "subtitle": "",
                "items": [
                    {"title": "Garden Room", "description": "Queen bed, courtyard view, breakfast included.", "price": 140}
                ],
                "currency": "USD"
            }),
        ),
        schema(
            "SimpleFooter", "SimpleFooter",
            "One-row footer with copyright and a few links",
            "footer", &["all"],
            &[("logo", Text), ("navigation", List), ("copyright", Text)],
            json!({
                "logo": "Your Brand",
                "navigation": [
                    {"label": "Privacy", "href": "#"},
                    {"label": "Terms", "href": "#"}
                ],
                "copyright": "All rights reserved."
            }),
        ),
        schema(
            "DetailedFooter", "DetailedFooter",
            "Multi-column footer with link groups, contact details and socials",
            "footer", &["technology", "ecommerce", "healthcare"],
            &[("logo", Text), ("navigation", List), ("email", Text), ("phone", Text), ("socials", List), ("copyright", Text)],
            json!({
                "logo": "Your Brand",
                "navigation": [
                    {"label": "About", "href": "#about"},
                    {"label": "Services", "href": "#services"},
                    {"label": "Contact", "href": "#contact"}
                ],
                "email": "hello@example.com",
                "phone": "+1 (555) 010-0100",
                "socials": [
                    {"label": "Twitter", "href": "#"},
                    {"label": "LinkedIn", "href": "#"}
                ],
                "copyright": "All rights reserved."
            }),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn template_names_are_unique() {
        let reg = SchemaRegistry::new();
        let mut seen = HashSet::new();
        for s in reg.all() {
            assert!(seen.insert(s.template_name.to_lowercase()), "duplicate template {}", s.template_name);
        }
    }

    #[test]
    fn lookup_by_either_name() {
        let reg = SchemaRegistry::new();
        assert!(reg.get("HeroBanner").is_some());
        assert!(reg.get("herobanner").is_some());
        assert!(reg.get("NoSuchThing").is_none());
    }

    #[test]
    fn industry_filter_includes_all_sentinel() {
        let reg = SchemaRegistry::new();
        let restaurant = reg.for_industry("restaurant");
        let names: Vec<_> = restaurant.iter().map(|s| s.template_name).collect();
        assert!(names.contains(&"MenuSection"));
        assert!(names.contains(&"HeroBanner"), "all-industry schemas included");
        assert!(!names.contains(&"ScheduleSection"), "fitness-only schema excluded");
    }

    #[test]
    fn prop_kind_lookup_is_case_insensitive() {
        let reg = SchemaRegistry::new();
        let hero = reg.get("HeroBanner").unwrap();
        assert_eq!(hero.prop_kind("overlay"), Some(PropKind::Boolean));
        assert_eq!(hero.prop_kind("Overlay"), Some(PropKind::Boolean));
        assert_eq!(hero.prop_kind("missing"), None);
    }

    #[test]
    fn defaults_are_objects_with_content() {
        let reg = SchemaRegistry::new();
        for s in reg.all() {
            assert!(!s.default_props.is_empty(), "{} has empty defaults", s.template_name);
            assert!(!s.category.is_empty());
            assert!(!s.industries.is_empty());
        }
    }
}
