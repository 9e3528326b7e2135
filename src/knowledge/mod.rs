use crate::wire::Palette;

/// Industry the pipeline falls back to whenever a requested key is unknown.
pub const DEFAULT_INDUSTRY: &str = "technology";

/// Static description of one business vertical: copy templates, component
/// preferences and imagery used by the prompt builder, the backfill step and
/// the deterministic fallback.
#[derive(Debug, Clone)]
pub struct IndustryProfile {
    pub key: &'static str,
    pub display_name: &'static str,
    pub required_components: &'static [&'static str],
    pub optional_components: &'static [&'static str],
    /// Vertical-specific sections, in backfill preference order.
    pub industry_components: &'static [&'static str],
    pub hero_titles: &'static [&'static str],
    pub taglines: &'static [&'static str],
    pub features: &'static [(&'static str, &'static str)],
    pub services: &'static [(&'static str, &'static str)],
    /// (name, role, quote)
    pub testimonials: &'static [(&'static str, &'static str, &'static str)],
    pub image_pool: &'static [&'static str],
}

/// Read-only lookup tables, built once at startup and handed to the
/// pipeline components that need them.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    profiles: &'static [IndustryProfile],
}

impl KnowledgeBase {
    pub fn new() -> Self {
        Self { profiles: PROFILES }
    }

    /// Profile lookup. Unknown keys resolve to the technology profile;
    /// callers never see an absent profile.
    pub fn get(&self, key: &str) -> &IndustryProfile {
        let key = key.trim().to_lowercase();
        self.profiles
            .iter()
            .find(|p| p.key == key)
            .or_else(|| self.profiles.iter().find(|p| p.key == DEFAULT_INDUSTRY))
            .unwrap_or(&self.profiles[0])
    }

    pub fn profiles(&self) -> &'static [IndustryProfile] {
        self.profiles
    }

    /// Industries considered close enough to stand in during retrieval.
    pub fn related(&self, key: &str) -> &'static [&'static str] {
        let key = key.trim().to_lowercase();
        RELATED_INDUSTRIES
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
            .unwrap_or(&[])
    }

    /// Five-color palette for (industry, style). Chain: exact pair, the
    /// industry's "modern" entry, the technology "modern" entry.
    pub fn palette(&self, industry: &str, style: &str) -> Palette {
        let industry = industry.trim().to_lowercase();
        let style = style.trim().to_lowercase();
        let hex = lookup_palette(&industry, &style)
            .or_else(|| lookup_palette(&industry, "modern"))
            .or_else(|| lookup_palette(DEFAULT_INDUSTRY, "modern"))
            .unwrap_or(&PALETTES[0].2);
        Palette {
            primary: hex[0].into(),
            secondary: hex[1].into(),
            accent: hex[2].into(),
            background: hex[3].into(),
            text: hex[4].into(),
        }
    }

    /// Hand-written title/subtitle for a backfilled section, when we have one.
    pub fn section_copy(&self, industry: &str, template: &str) -> Option<(&'static str, &'static str)> {
        let industry = industry.trim().to_lowercase();
        SECTION_COPY
            .iter()
            .find(|(i, t, _, _)| *i == industry && t.eq_ignore_ascii_case(template))
            .map(|(_, _, title, subtitle)| (*title, *subtitle))
    }

    /// Generic copy used when no hand-written entry exists for the template.
    pub fn generic_copy(&self, template: &str, website: &str, industry: &str) -> (String, String) {
        (
            format!("Explore Our {}", pretty_component_name(template)),
            format!("Explore the best of {website} for your {industry} needs"),
        )
    }
}

fn lookup_palette(industry: &str, style: &str) -> Option<&'static [&'static str; 5]> {
    PALETTES
        .iter()
        .find(|(i, s, _)| *i == industry && *s == style)
        .map(|(_, _, hex)| hex)
}

/// "MenuSection" -> "Menu", "FaqAccordion" -> "Faq". Splits camel case and
/// drops a trailing structural word so the generic copy reads naturally.
pub fn pretty_component_name(template: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    for ch in template.chars() {
        if ch.is_uppercase() && !current.is_empty() {
            words.push(current.clone());
            current.clear();
        }
        current.push(ch);
    }
    if !current.is_empty() {
        words.push(current);
    }
    const STRUCTURAL: &[&str] = &[
        "Section", "Grid", "Banner", "Strip", "Carousel", "Accordion", "Form", "Table",
        "Showcase", "Catalog", "Signup",
    ];
    if words.len() > 1 {
        if let Some(last) = words.last() {
            if STRUCTURAL.contains(&last.as_str()) {
                words.pop();
            }
        }
    }
    words.join(" ")
}

const RELATED_INDUSTRIES: &[(&str, &[&str])] = &[
    ("restaurant", &["hospitality", "ecommerce"]),
    ("hospitality", &["restaurant", "realestate"]),
    ("healthcare", &["fitness"]),
    ("fitness", &["healthcare"]),
    ("ecommerce", &["technology", "restaurant"]),
    ("education", &["technology"]),
    ("realestate", &["hospitality"]),
    ("technology", &["ecommerce", "education"]),
];

// (industry, style, [primary, secondary, accent, background, text])
const PALETTES: &[(&str, &str, [&str; 5])] = &[
    ("technology", "modern", ["#2563eb", "#0f172a", "#38bdf8", "#ffffff", "#0f172a"]),
    ("technology", "classic", ["#1e3a5f", "#12233b", "#c9a227", "#f8f7f2", "#1c2733"]),
    ("technology", "bold", ["#7c3aed", "#18181b", "#f43f5e", "#0b0b0f", "#fafafa"]),
    ("technology", "minimal", ["#111827", "#4b5563", "#6b7280", "#ffffff", "#111827"]),
    ("restaurant", "modern", ["#b91c1c", "#292524", "#f59e0b", "#fffbf5", "#292524"]),
    ("restaurant", "classic", ["#7f1d1d", "#3f2d23", "#b45309", "#faf6ef", "#2d2016"]),
    ("restaurant", "bold", ["#dc2626", "#111111", "#fbbf24", "#141210", "#fef3c7"]),
    ("healthcare", "modern", ["#0e7490", "#134e4a", "#2dd4bf", "#f0fdfa", "#134e4a"]),
    ("healthcare", "classic", ["#155e75", "#1e3a3a", "#0891b2", "#f6fefd", "#173a3a"]),
    ("fitness", "modern", ["#ea580c", "#1c1917", "#84cc16", "#fafaf9", "#1c1917"]),
    ("fitness", "bold", ["#f97316", "#0c0a09", "#a3e635", "#121110", "#fafaf9"]),
    ("ecommerce", "modern", ["#4f46e5", "#1e1b4b", "#ec4899", "#ffffff", "#1e1b4b"]),
    ("ecommerce", "minimal", ["#27272a", "#52525b", "#a1a1aa", "#fafafa", "#18181b"]),
    ("education", "modern", ["#1d4ed8", "#1e293b", "#f59e0b", "#f8fafc", "#1e293b"]),
    ("education", "classic", ["#1e40af", "#263044", "#b45309", "#f7f5f0", "#222c3d"]),
    ("hospitality", "modern", ["#92400e", "#292017", "#d4a373", "#fdfaf5", "#292017"]),
    ("hospitality", "classic", ["#713f12", "#2d2414", "#ca8a04", "#faf7f0", "#2a2111"]),
    ("realestate", "modern", ["#065f46", "#1c2a26", "#d97706", "#fcfdfb", "#1c2a26"]),
    ("realestate", "classic", ["#064e3b", "#20302b", "#b45309", "#f8f7f3", "#203029"]),
];

// (industry, template, title, subtitle): curated copy for backfilled sections.
const SECTION_COPY: &[(&str, &str, &str, &str)] = &[
    ("restaurant", "MenuSection", "Our Menu", "Seasonal dishes made from scratch, every morning"),
    ("restaurant", "GalleryGrid", "From Our Kitchen", "A look at the plates and the people behind them"),
    ("restaurant", "TestimonialCarousel", "What Our Guests Say", "Reviews from the tables we serve"),
    ("restaurant", "ProductShowcase", "Take It Home", "Sauces, blends and gift cards from our pantry"),
    ("hospitality", "RoomShowcase", "Rooms & Suites", "Find the space that fits your stay"),
    ("hospitality", "GalleryGrid", "Around the Property", "Spaces designed for slow mornings"),
    ("healthcare", "AppointmentBooking", "Book an Appointment", "Same-week visits with the right specialist"),
    ("healthcare", "TeamSection", "Meet Our Providers", "Board-certified and on your side"),
    ("fitness", "ScheduleSection", "Weekly Class Schedule", "Find a session that fits your week"),
    ("fitness", "PricingTable", "Membership Plans", "Simple pricing, no contracts"),
    ("ecommerce", "ProductShowcase", "Featured Products", "Hand-picked from this season's collection"),
    ("ecommerce", "PricingTable", "Plans & Bundles", "More value the longer you stay"),
    ("education", "CourseCatalog", "Browse Courses", "Programs for every stage of learning"),
    ("education", "StatsStrip", "Results That Matter", "Outcomes our students earned last year"),
    ("realestate", "PropertyListings", "Current Listings", "Homes on the market this week"),
    ("realestate", "StatsStrip", "Market Snapshot", "What buyers and sellers are seeing now"),
    ("technology", "FeatureGrid", "Built for the Way You Work", "Capabilities that compound"),
    ("technology", "StatsStrip", "Proof in Numbers", "What teams achieve on the platform"),
    ("technology", "PricingTable", "Simple, Transparent Pricing", "Start free, scale when you do"),
];

const PROFILES: &[IndustryProfile] = &[
    IndustryProfile {
        key: "technology",
        display_name: "Technology",
        required_components: &["ModernHeader", "HeroBanner", "AboutSection", "ContactForm", "SimpleFooter"],
        optional_components: &["FeatureGrid", "PricingTable", "TestimonialCarousel", "FaqAccordion", "CtaBanner", "NewsletterSignup", "TeamSection"],
        industry_components: &["FeatureGrid", "StatsStrip", "PricingTable"],
        hero_titles: &[
            "Ship Better Software, Faster",
            "The Platform Your Team Grows Into",
            "Modern Tools for Modern Teams",
        ],
        taglines: &[
            "Everything you need, nothing you don't",
            "Built by engineers, loved by teams",
        ],
        features: &[
            ("Real-Time Collaboration", "Work together across time zones without stepping on each other."),
            ("Enterprise-Grade Security", "SOC 2 compliant with end-to-end encryption by default."),
            ("Integrations That Matter", "Connect the tools you already use in a couple of clicks."),
            ("Insightful Analytics", "Dashboards that answer questions before you ask them."),
        ],
        services: &[
            ("Custom Development", "Product engineering from prototype to production."),
            ("Cloud Migration", "Move workloads without downtime or surprises."),
            ("Technical Consulting", "Architecture reviews and roadmaps that hold up."),
        ],
        testimonials: &[
            ("Maya Chen", "CTO, Brightline", "We cut our release cycle from weeks to days. The team actually enjoys deploys now."),
            ("Tom Okafor", "Engineering Lead, Fieldnote", "The onboarding was the smoothest I've seen for a tool this deep."),
        ],
        image_pool: &[
            "https://images.unsplash.com/photo-1551434678-e076c223a692",
            "https://images.unsplash.com/photo-1498050108023-c5249f4df085",
            "https://images.unsplash.com/photo-1519389950473-47ba0277781c",
        ],
    },
    IndustryProfile {
        key: "restaurant",
        display_name: "Restaurant",
        required_components: &["ClassicHeader", "HeroBanner", "AboutSection", "ContactForm", "SimpleFooter"],
        optional_components: &["GalleryGrid", "TestimonialCarousel", "FaqAccordion", "CtaBanner", "NewsletterSignup"],
        industry_components: &["MenuSection", "GalleryGrid", "TestimonialCarousel"],
        hero_titles: &[
            "A Table Worth Coming Back To",
            "Honest Food, Made Daily",
            "Where Every Meal Is an Occasion",
        ],
        taglines: &[
            "Fresh ingredients, familiar warmth",
            "From our kitchen to your table",
        ],
        features: &[
            ("Seasonal Menu", "Dishes change with the market, not the other way around."),
            ("Local Sourcing", "Produce and proteins from farms we know by name."),
            ("Private Dining", "Rooms for celebrations of eight to eighty."),
        ],
        services: &[
            ("Dinner Service", "Tuesday through Sunday, walk-ins welcome at the bar."),
            ("Catering", "Full-service catering for events of any size."),
            ("Private Events", "A dedicated team for rehearsals, launches and birthdays."),
        ],
        testimonials: &[
            ("Elena Rossi", "Regular since 2019", "The tasting menu is the best value in the city, and the staff remember your name."),
            ("David Park", "Food & Wine Weekly", "A neighborhood spot that cooks like it has something to prove."),
        ],
        image_pool: &[
            "https://images.unsplash.com/photo-1517248135467-4c7edcad34c4",
            "https://images.unsplash.com/photo-1414235077428-338989a2e8c0",
            "https://images.unsplash.com/photo-1555396273-367ea4eb4db5",
        ],
    },
    IndustryProfile {
        key: "healthcare",
        display_name: "Healthcare",
        required_components: &["ModernHeader", "HeroBanner", "AboutSection", "ContactForm", "DetailedFooter"],
        optional_components: &["TeamSection", "TestimonialCarousel", "FaqAccordion", "StatsStrip"],
        industry_components: &["AppointmentBooking", "TeamSection", "ServicesGrid"],
        hero_titles: &[
            "Care That Starts with Listening",
            "Your Health, Handled with Respect",
        ],
        taglines: &[
            "Modern medicine, human pace",
            "The clinic your family keeps",
        ],
        features: &[
            ("Same-Week Appointments", "See a provider within days, not months."),
            ("Coordinated Care", "One record, one team, no repeating yourself."),
            ("Transparent Billing", "Costs you can see before you commit."),
        ],
        services: &[
            ("Primary Care", "Annual exams, chronic care and everything between."),
            ("Pediatrics", "From first checkups through the teenage years."),
            ("Telehealth", "Licensed providers from wherever you are."),
        ],
        testimonials: &[
            ("Sarah Whitfield", "Patient", "First practice where I never feel rushed out of the room."),
            ("James Liu", "Patient", "Booking, results, follow-ups — all in one place, all on time."),
        ],
        image_pool: &[
            "https://images.unsplash.com/photo-1579684385127-1ef15d508118",
            "https://images.unsplash.com/photo-1576091160399-112ba8d25d1d",
        ],
    },
    IndustryProfile {
        key: "fitness",
        display_name: "Fitness",
        required_components: &["ModernHeader", "HeroBanner", "AboutSection", "ContactForm", "SimpleFooter"],
        optional_components: &["PricingTable", "TestimonialCarousel", "StatsStrip", "CtaBanner", "GalleryGrid"],
        industry_components: &["ScheduleSection", "PricingTable", "TeamSection"],
        hero_titles: &[
            "Stronger Every Session",
            "Train Like You Mean It",
        ],
        taglines: &[
            "Coaching, community, consistency",
            "Show up. We handle the rest",
        ],
        features: &[
            ("Expert Coaching", "Certified trainers who program for your goals."),
            ("Small Class Sizes", "Never more than twelve to a session."),
            ("Open 24/7", "Your schedule is the schedule."),
        ],
        services: &[
            ("Group Classes", "Strength, conditioning, mobility and spin."),
            ("Personal Training", "One-on-one programming and accountability."),
            ("Nutrition Coaching", "Habits that survive the weekend."),
        ],
        testimonials: &[
            ("Marcus Reed", "Member, 2 years", "Down 18 kg and deadlifting double what I started with."),
            ("Aisha Bello", "Member, 6 months", "The coaches notice when you're off. That's rare."),
        ],
        image_pool: &[
            "https://images.unsplash.com/photo-1534438327276-14e5300c3a48",
            "https://images.unsplash.com/photo-1571019613454-1cb2f99b2d8b",
        ],
    },
    IndustryProfile {
        key: "ecommerce",
        display_name: "E-Commerce",
        required_components: &["ModernHeader", "HeroBanner", "AboutSection", "ContactForm", "DetailedFooter"],
        optional_components: &["PricingTable", "TestimonialCarousel", "FaqAccordion", "NewsletterSignup", "CtaBanner"],
        industry_components: &["ProductShowcase", "FeatureGrid", "NewsletterSignup"],
        hero_titles: &[
            "Things Worth Keeping",
            "Shop the Collection",
        ],
        taglines: &[
            "Free shipping, easy returns, no fine print",
            "Quality you can feel from the box",
        ],
        features: &[
            ("Free Returns", "Thirty days, no questions, prepaid label."),
            ("Carbon-Neutral Shipping", "Every order offsets its own footprint."),
            ("Made to Last", "Warrantied for two years, built for ten."),
        ],
        services: &[
            ("Worldwide Delivery", "Tracked shipping to over 60 countries."),
            ("Gift Wrapping", "Hand-wrapped with a note, on request."),
            ("Concierge Support", "A real person answers within the hour."),
        ],
        testimonials: &[
            ("Priya Nair", "Verified buyer", "Ordered Monday, wearing it Thursday. The quality photos undersell it."),
            ("Leo Fontaine", "Verified buyer", "Customer service replaced a lost package without a single form."),
        ],
        image_pool: &[
            "https://images.unsplash.com/photo-1441986300917-64674bd600d8",
            "https://images.unsplash.com/photo-1472851294608-062f824d29cc",
        ],
    },
    IndustryProfile {
        key: "education",
        display_name: "Education",
        required_components: &["ModernHeader", "HeroBanner", "AboutSection", "ContactForm", "SimpleFooter"],
        optional_components: &["TeamSection", "TestimonialCarousel", "FaqAccordion", "StatsStrip", "CtaBanner"],
        industry_components: &["CourseCatalog", "StatsStrip", "TeamSection"],
        hero_titles: &[
            "Learn Something That Lasts",
            "Education That Meets You Where You Are",
        ],
        taglines: &[
            "Small classes, serious outcomes",
            "Teachers who teach, not lecture",
        ],
        features: &[
            ("Live Instruction", "Real classes with real instructors, not recordings."),
            ("Career Support", "Portfolio reviews and interview prep built in."),
            ("Flexible Pacing", "Evening and weekend tracks for working adults."),
        ],
        services: &[
            ("Certificate Programs", "Twelve-week intensives with employer recognition."),
            ("Corporate Training", "Upskill whole teams on your stack and schedule."),
            ("One-on-One Tutoring", "Targeted help, billed by the session."),
        ],
        testimonials: &[
            ("Hannah Gross", "Graduate, Data Track", "Hired within a month of finishing. The portfolio projects did the talking."),
            ("Omar Haddad", "Parent", "The first tutoring program my son actually asked to go back to."),
        ],
        image_pool: &[
            "https://images.unsplash.com/photo-1523050854058-8df90110c9f1",
            "https://images.unsplash.com/photo-1509062522246-3755977927d7",
        ],
    },
    IndustryProfile {
        key: "hospitality",
        display_name: "Hospitality",
        required_components: &["ClassicHeader", "HeroBanner", "AboutSection", "ContactForm", "SimpleFooter"],
        optional_components: &["GalleryGrid", "TestimonialCarousel", "FaqAccordion", "CtaBanner"],
        industry_components: &["RoomShowcase", "GalleryGrid", "TestimonialCarousel"],
        hero_titles: &[
            "Stay a While",
            "Rest, the Way It Should Feel",
        ],
        taglines: &[
            "Quiet rooms, generous mornings",
            "Your home between homes",
        ],
        features: &[
            ("Breakfast Included", "Cooked to order until eleven, every day."),
            ("In the Old Quarter", "Five minutes on foot from everything worth seeing."),
            ("Pet Friendly", "Beds and bowls provided, no surcharge."),
        ],
        services: &[
            ("Concierge", "Reservations, tickets and tips from people who live here."),
            ("Airport Transfers", "Fixed-price pickups around the clock."),
            ("Event Hosting", "Courtyard and hall for up to 120 guests."),
        ],
        testimonials: &[
            ("Claire Dubois", "Guest", "The kind of place you extend a trip for. We did, twice."),
            ("Ken Watanabe", "Guest", "Quietest sleep I've had in a city hotel, and the breakfast earns its reputation."),
        ],
        image_pool: &[
            "https://images.unsplash.com/photo-1566073771259-6a8506099945",
            "https://images.unsplash.com/photo-1551882547-ff40c63fe5fa",
        ],
    },
    IndustryProfile {
        key: "realestate",
        display_name: "Real Estate",
        required_components: &["ClassicHeader", "HeroBanner", "AboutSection", "ContactForm", "DetailedFooter"],
        optional_components: &["TeamSection", "TestimonialCarousel", "StatsStrip", "CtaBanner", "GalleryGrid"],
        industry_components: &["PropertyListings", "StatsStrip", "TeamSection"],
        hero_titles: &[
            "Find the Door That Feels Like Yours",
            "Homes, Matched to How You Live",
        ],
        taglines: &[
            "Local knowledge, straight answers",
            "We sell the street, not just the house",
        ],
        features: &[
            ("Neighborhood Experts", "Agents who can name the best bakery on every block."),
            ("Honest Valuations", "Priced from data, explained in plain language."),
            ("End-to-End Handling", "Inspection to closing, one point of contact."),
        ],
        services: &[
            ("Buying", "Search, tour, negotiate and close with one team."),
            ("Selling", "Staging, photography and listing strategy included."),
            ("Property Management", "Tenants found, rent collected, repairs handled."),
        ],
        testimonials: &[
            ("Nora Stein", "First-time buyer", "They talked us out of two houses before finding the right one. That's trust."),
            ("Paul Ivers", "Seller", "Listed Friday, three offers by Tuesday, closed above asking."),
        ],
        image_pool: &[
            "https://images.unsplash.com/photo-1560518883-ce09059eeffa",
            "https://images.unsplash.com/photo-1564013799919-ab600027ffc6",
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_industry_resolves_to_technology() {
        let kb = KnowledgeBase::new();
        assert_eq!(kb.get("underwater-basket-weaving").key, "technology");
        assert_eq!(kb.get("").key, "technology");
        assert_eq!(kb.get("Restaurant").key, "restaurant");
    }

    #[test]
    fn every_profile_has_components_and_copy() {
        let kb = KnowledgeBase::new();
        for p in kb.profiles() {
            assert!(!p.required_components.is_empty(), "{} has no required components", p.key);
            assert!(!p.industry_components.is_empty(), "{} has no industry components", p.key);
            assert!(!p.hero_titles.is_empty());
            assert!(!p.taglines.is_empty());
        }
    }

    #[test]
    fn palette_chain_falls_back() {
        let kb = KnowledgeBase::new();
        // Exact pair.
        assert_eq!(kb.palette("restaurant", "classic").primary, "#7f1d1d");
        // Missing style for the industry -> industry's modern entry.
        assert_eq!(kb.palette("healthcare", "bold").primary, kb.palette("healthcare", "modern").primary);
        // Unknown industry -> technology modern.
        assert_eq!(kb.palette("nonsense", "modern").primary, kb.palette("technology", "modern").primary);
    }

    #[test]
    fn section_copy_lookup() {
        let kb = KnowledgeBase::new();
        let (title, _) = kb.section_copy("restaurant", "MenuSection").unwrap();
        assert_eq!(title, "Our Menu");
        assert!(kb.section_copy("restaurant", "NoSuchTemplate").is_none());
    }

    #[test]
    fn generic_copy_pattern() {
        let kb = KnowledgeBase::new();
        let (title, subtitle) = kb.generic_copy("MenuSection", "Luigi's", "restaurant");
        assert_eq!(title, "Explore Our Menu");
        assert_eq!(subtitle, "Explore the best of Luigi's for your restaurant needs");
    }

    #[test]
    fn pretty_names() {
        assert_eq!(pretty_component_name("MenuSection"), "Menu");
        assert_eq!(pretty_component_name("FaqAccordion"), "Faq");
        assert_eq!(pretty_component_name("PropertyListings"), "Property Listings");
        assert_eq!(pretty_component_name("HeroBanner"), "Hero");
    }
}
