use crate::knowledge::KnowledgeBase;
use crate::wire::RetrievedDocument;

/// Penalty applied to documents pulled in via the related-industry table so
/// they rank below exact-industry matches.
const RELATED_PENALTY: f32 = 0.7;

#[derive(Debug, Clone)]
struct CorpusDoc {
    title: &'static str,
    content: &'static str,
    industry: &'static str,
    tags: &'static [&'static str],
}

/// Small fixed corpus of industry write-ups used as generation context.
/// A stand-in for real retrieval: scoring is keyword overlap, nothing more.
#[derive(Debug, Clone)]
pub struct DocumentCorpus {
    docs: &'static [CorpusDoc],
}

impl DocumentCorpus {
    pub fn new() -> Self {
        Self { docs: CORPUS }
    }

    /// Most relevant documents first. Never fails: an empty slice of matches
    /// degrades to related industries, then to the head of the whole corpus.
    pub fn retrieve(
        &self,
        kb: &KnowledgeBase,
        industry: &str,
        query: &str,
        limit: usize,
    ) -> Vec<RetrievedDocument> {
        let industry = industry.trim().to_lowercase();

        let mut pool: Vec<(&CorpusDoc, bool)> = self
            .docs
            .iter()
            .filter(|d| d.industry == industry)
            .map(|d| (d, false))
            .collect();

        if pool.is_empty() {
            let related = kb.related(&industry);
            pool = self
                .docs
                .iter()
                .filter(|d| related.contains(&d.industry))
                .map(|d| (d, true))
                .collect();
        }

        if pool.is_empty() {
            // Last resort: the head of the corpus, unscored.
            return self
                .docs
                .iter()
                .take(limit)
                .map(|d| to_document(d, None))
                .collect();
        }

        let mut scored: Vec<(RetrievedDocument, f32)> = pool
            .into_iter()
            .map(|(d, related)| {
                let mut s = score_document(d, &industry, query);
                if related {
                    s *= RELATED_PENALTY;
                }
                (to_document(d, Some(s)), s)
            })
            .collect();

        // Stable sort: ties keep original corpus order.
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.into_iter().map(|(d, _)| d).take(limit).collect()
    }
}

fn to_document(d: &CorpusDoc, score: Option<f32>) -> RetrievedDocument {
    RetrievedDocument {
        title: d.title.into(),
        content: d.content.into(),
        industry: d.industry.into(),
        tags: d.tags.iter().map(|t| (*t).into()).collect(),
        score,
    }
}

fn score_document(d: &CorpusDoc, industry: &str, query: &str) -> f32 {
    let mut score = 0.0f32;
    let title = d.title.to_lowercase();
    let body = d.content.to_lowercase();
    let query = query.to_lowercase();

    if !industry.is_empty() && title.contains(industry) {
        score += 10.0;
    }
    if !industry.is_empty() && d.tags.iter().any(|t| t.contains(industry)) {
        score += 5.0;
    }
    for word in query.split_whitespace().filter(|w| w.chars().count() >= 4) {
        if body.contains(word) {
            score += 2.0;
        }
    }
    for tag in d.tags {
        if query.contains(tag) {
            score += 3.0;
        }
    }
    score
}

const CORPUS: &[CorpusDoc] = &[
    CorpusDoc {
        title: "What makes a technology landing page convert",
        content: "Technology buyers scan for proof: a clear headline, a product screenshot, \
                  integration logos and a pricing table they can understand in ten seconds. \
                  Feature grids work best in threes, and social proof from named customers \
                  outperforms anonymous star ratings.",
        industry: "technology",
        tags: &["saas", "software", "startup", "pricing"],
    },
    CorpusDoc {
        title: "Technology brand voice and trust signals",
        content: "Security badges, uptime numbers and a changelog link signal an engineering \
                  culture. Developer-facing products benefit from terse copy and code samples; \
                  buyer-facing products need outcome language and analyst quotes.",
        industry: "technology",
        tags: &["security", "developer", "enterprise"],
    },
    CorpusDoc {
        title: "Restaurant websites that fill tables",
        content: "Diners come for three things: the menu, the hours and the reservation link. \
                  Put the menu one click from the hero, show real photos of real plates, and \
                  keep prices on the page. A chef's story builds loyalty; stock photos destroy it.",
        industry: "restaurant",
        tags: &["menu", "dining", "reservations", "food"],
    },
    CorpusDoc {
        title: "Seasonal menus and local sourcing as a restaurant story",
        content: "Restaurants that name their farms and rotate the menu with the market give \
                  returning guests a reason to check the site weekly. Gallery sections of the \
                  kitchen at work perform better than dining-room wide shots.",
        industry: "restaurant",
        tags: &["seasonal", "local", "bistro", "italian"],
    },
    CorpusDoc {
        title: "Healthcare practice sites patients actually use",
        content: "Patients arrive anxious and in a hurry. Appointment booking belongs above the \
                  fold, provider photos with credentials build trust, and insurance information \
                  must be findable without a phone call. Plain language beats clinical jargon.",
        industry: "healthcare",
        tags: &["clinic", "patients", "appointments", "providers"],
    },
    CorpusDoc {
        title: "Telehealth and coordinated care messaging",
        content: "Practices that surface same-week availability and telehealth options see \
                  measurably more bookings. A short section on billing transparency reduces \
                  front-desk calls more than any FAQ.",
        industry: "healthcare",
        tags: &["telehealth", "billing", "family"],
    },
    CorpusDoc {
        title: "Fitness studio pages that sell memberships",
        content: "The class schedule is the product: make it current, printable and honest about \
                  intensity levels. Transformation stories with member names convert better than \
                  equipment photos. Price anchoring with a free trial class lowers the barrier.",
        industry: "fitness",
        tags: &["gym", "classes", "membership", "training"],
    },
    CorpusDoc {
        title: "Coaching credibility for gyms and studios",
        content: "Certifications matter less to visitors than coach bios that sound like people. \
                  Small-group positioning and a visible cap on class size justify premium pricing.",
        industry: "fitness",
        tags: &["coaching", "community", "strength"],
    },
    CorpusDoc {
        title: "E-commerce product storytelling",
        content: "Shoppers need the product in context within the first screen: lifestyle image, \
                  price, shipping promise. Returns policy near the buy button lifts conversion. \
                  Curated 'featured' collections outperform exhaustive catalogs on landing pages.",
        industry: "ecommerce",
        tags: &["shop", "products", "shipping", "returns"],
    },
    CorpusDoc {
        title: "Trust mechanics for online stores",
        content: "Verified-buyer reviews with photos, a plain-English warranty and visible \
                  support response times are the three strongest trust signals for first-time \
                  customers of an unknown brand.",
        industry: "ecommerce",
        tags: &["reviews", "warranty", "trust"],
    },
    CorpusDoc {
        title: "Hospitality sites that win direct bookings",
        content: "Guests compare three tabs at once: photos, location and rate. Room cards with \
                  honest square footage and a visible breakfast policy beat panoramic sliders. \
                  A neighborhood guide written by staff keeps guests on the site.",
        industry: "hospitality",
        tags: &["hotel", "rooms", "booking", "travel"],
    },
    CorpusDoc {
        title: "Boutique stays and the details that matter",
        content: "Small properties compete on character: pet policy, late checkout, local \
                  partnerships. Photography of morning light in real rooms outperforms staged \
                  twilight exteriors.",
        industry: "hospitality",
        tags: &["boutique", "guesthouse", "breakfast"],
    },
    CorpusDoc {
        title: "Real estate sites buyers return to",
        content: "Listings must lead with price, beds, baths and the neighborhood name. Market \
                  snapshot numbers updated weekly give buyers a reason to come back. Agent \
                  pages with transaction counts convert better than lifestyle portraits.",
        industry: "realestate",
        tags: &["listings", "homes", "agents", "market"],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> (DocumentCorpus, KnowledgeBase) {
        (DocumentCorpus::new(), KnowledgeBase::new())
    }

    #[test]
    fn exact_industry_docs_rank_first() {
        let (c, kb) = corpus();
        let docs = c.retrieve(&kb, "restaurant", "cozy italian bistro with a seasonal menu", 3);
        assert!(!docs.is_empty());
        for d in &docs {
            assert_eq!(d.industry, "restaurant");
        }
        // The seasonal/local doc mentions both query words and the bistro tag.
        assert_eq!(docs[0].title, "Seasonal menus and local sourcing as a restaurant story");
    }

    #[test]
    fn related_industry_fallback_applies_penalty() {
        let (c, kb) = corpus();
        // No education documents exist; adjacency routes to technology.
        let docs = c.retrieve(&kb, "education", "online courses", 5);
        assert!(!docs.is_empty());
        for d in &docs {
            assert_eq!(d.industry, "technology");
        }
        // Related matches are still scored (with the 0.7 penalty applied).
        for d in &docs {
            assert!(d.score.is_some());
        }
    }

    #[test]
    fn unknown_industry_uses_corpus_head() {
        let (c, kb) = corpus();
        let docs = c.retrieve(&kb, "zeppelin-repair", "anything at all", 4);
        assert_eq!(docs.len(), 4);
        assert_eq!(docs[0].title, CORPUS[0].title);
        assert!(docs[0].score.is_none());
    }

    #[test]
    fn limit_truncates() {
        let (c, kb) = corpus();
        let docs = c.retrieve(&kb, "technology", "software", 1);
        assert_eq!(docs.len(), 1);
    }

    #[test]
    fn empty_query_still_returns_documents() {
        let (c, kb) = corpus();
        let docs = c.retrieve(&kb, "fitness", "", 10);
        assert_eq!(docs.len(), 2);
    }

    #[test]
    fn ties_keep_corpus_order() {
        let (c, kb) = corpus();
        // A query matching nothing gives both healthcare docs equal scores
        // beyond the shared industry-tag bonus.
        let docs = c.retrieve(&kb, "healthcare", "xyzzy", 2);
        assert_eq!(docs.len(), 2);
        let t0 = docs[0].score.unwrap_or(0.0);
        let t1 = docs[1].score.unwrap_or(0.0);
        if (t0 - t1).abs() < f32::EPSILON {
            assert_eq!(docs[0].title, "Healthcare practice sites patients actually use");
        }
    }
}
