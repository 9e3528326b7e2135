use chrono::Utc;
use regex::Regex;
use serde_json::{json, Map, Value};
use std::collections::HashSet;

use crate::errors::GenerateError;
use crate::knowledge::{IndustryProfile, KnowledgeBase};
use crate::registry::{ComponentSchema, PropKind, SchemaRegistry};
use crate::wire::{GeneratedWebsite, GenerationParams, Palette, Section, SiteMetadata};

/// Backfill order once an industry's own sections are exhausted.
const CATEGORY_PRIORITY: &[&str] = &[
    "hero", "features", "services", "about", "testimonials", "contact", "cta", "faq",
];

/// Prop names whose numeric/boolean values pass through uncoerced even when
/// the schema carries no type hint for them.
const NUMERIC_NAMES: &[&str] = &["rating", "price", "count", "id", "order", "width", "height"];

/// Turn a raw model response into a finalized website.
///
/// Extraction and structural validation (steps 1-2) are the only fallible
/// steps; everything after them repairs in place and reports warnings. The
/// whole pass is idempotent: feeding a repaired website's own components back
/// through produces the identical website.
pub fn parse_and_repair(
    raw: &str,
    params: &GenerationParams,
    registry: &SchemaRegistry,
    kb: &KnowledgeBase,
) -> Result<(GeneratedWebsite, Vec<String>), GenerateError> {
    let parsed = extract_json(raw)?;
    let components = parsed
        .get("components")
        .and_then(Value::as_array)
        .ok_or_else(|| {
            GenerateError::MalformedResponse("response has no components array".into())
        })?
        .clone();

    let mut warnings = Vec::new();
    let mut sections: Vec<Section> = Vec::new();

    for (idx, entry) in components.iter().enumerate() {
        let Some(obj) = entry.as_object() else {
            warnings.push(format!("component #{idx} is not an object; dropped"));
            continue;
        };
        let declared = obj
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let supplied = obj
            .get("props")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();
        let variant = obj
            .get("variant")
            .and_then(Value::as_str)
            .unwrap_or("default")
            .to_string();

        let schema = match resolve_schema(registry, &declared, &params.industry) {
            Resolution::Known(s) => s,
            Resolution::Repaired(s) => {
                warnings.push(format!(
                    "unknown component type \"{declared}\" replaced with {}",
                    s.template_name
                ));
                s
            }
            Resolution::NotFound => {
                warnings.push(format!(
                    "unknown component type \"{declared}\" has no usable replacement; dropped"
                ));
                continue;
            }
        };

        sections.push(Section {
            component: schema.template_name.to_string(),
            variant,
            props: clean_props(&supplied, schema),
        });
    }

    backfill(&mut sections, params, registry, kb, &mut warnings);
    let mut sections = reorder(sections);
    clamp_count(&mut sections, params.component_count + 3, &mut warnings);

    Ok((finalize(sections, &parsed, params, kb), warnings))
}

/// ========================================
/// Step 1: extraction
/// ========================================

fn extract_json(raw: &str) -> Result<Value, GenerateError> {
    let candidate = fenced_block(raw)
        .or_else(|| brace_slice(raw))
        .ok_or_else(|| GenerateError::MalformedResponse("no JSON object found in response".into()))?;
    serde_json::from_str(&candidate)
        .map_err(|e| GenerateError::MalformedResponse(format!("invalid JSON: {e}")))
}

/// Contents of a ```json fenced block, tolerating prose before and after the
/// fences.
fn fenced_block(raw: &str) -> Option<String> {
    let re = Regex::new(r"(?s)```json\s*(.*?)```").ok()?;
    re.captures(raw)
        .map(|c| c[1].trim().to_string())
        .filter(|s| !s.is_empty())
}

/// First `{` through last `}`; the model's prose around the object is sliced
/// away, but the braces themselves must balance for the parse to succeed.
fn brace_slice(raw: &str) -> Option<String> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end < start {
        return None;
    }
    Some(raw[start..=end].to_string())
}

/// ========================================
/// Step 4: type validation & repair
/// ========================================

/// Outcome of resolving a declared component type against the registry.
/// Resolution never fails the pipeline: an unknown type either repairs to
/// the best-scoring schema or drops the component.
pub enum Resolution<'a> {
    Known(&'a ComponentSchema),
    Repaired(&'a ComponentSchema),
    NotFound,
}

pub fn resolve_schema<'a>(
    registry: &'a SchemaRegistry,
    declared: &str,
    industry: &str,
) -> Resolution<'a> {
    if let Some(s) = registry.get(declared) {
        return Resolution::Known(s);
    }

    let norm = normalize_type_name(declared);
    let mut best: Option<(&ComponentSchema, i32)> = None;
    for s in registry.all() {
        let mut score = 0;
        if s.template_name.to_lowercase().contains(&norm) {
            score += 5;
        }
        if s.category == norm {
            score += 10;
        }
        if s.industries.iter().any(|i| i.eq_ignore_ascii_case(industry)) {
            score += 3;
        }
        if s.lists_all() {
            score += 1;
        }
        if score > best.map(|(_, b)| b).unwrap_or(0) {
            best = Some((s, score));
        }
    }

    match best {
        Some((s, _)) => Resolution::Repaired(s),
        None => Resolution::NotFound,
    }
}

/// Lowercase with the structural substrings stripped, so "PricingSection"
/// can meet the "pricing" category halfway.
fn normalize_type_name(declared: &str) -> String {
    let mut t = declared.to_lowercase();
    for strip in ["section", "header", "footer", "hero"] {
        t = t.replace(strip, "");
    }
    t.chars().filter(|c| c.is_alphanumeric()).collect()
}

/// ========================================
/// Step 3: prop cleaning
/// ========================================

/// Schema defaults merged under the supplied props (supplied wins, null never
/// does), then every value normalized.
pub fn clean_props(supplied: &Map<String, Value>, schema: &ComponentSchema) -> Map<String, Value> {
    let mut merged = schema.default_props.clone();
    overlay(&mut merged, supplied);

    let mut out = Map::new();
    for (k, v) in merged {
        let kind = schema.prop_kind(&k);
        let cleaned = clean_value(&k, v, kind);
        out.insert(k, cleaned);
    }
    out
}

fn overlay(base: &mut Map<String, Value>, over: &Map<String, Value>) {
    for (k, v) in over {
        if v.is_null() {
            continue;
        }
        match (base.get_mut(k), v) {
            (Some(Value::Object(b)), Value::Object(o)) => overlay(b, o),
            _ => {
                base.insert(k.clone(), v.clone());
            }
        }
    }
}

fn clean_value(name: &str, value: Value, kind: Option<PropKind>) -> Value {
    match value {
        Value::Array(items) => normalize_array(name, items),
        Value::Object(obj) => Value::Object(clean_object(obj)),
        primitive => coerce_primitive(name, primitive, kind),
    }
}

fn clean_object(obj: Map<String, Value>) -> Map<String, Value> {
    obj.into_iter()
        .map(|(k, v)| {
            let cleaned = clean_value(&k, v, None);
            (k, cleaned)
        })
        .collect()
}

/// Array-shape normalization: recognized prop names get a canonical element
/// shape; everything else gets element-wise cleanup.
fn normalize_array(name: &str, items: Vec<Value>) -> Value {
    let lname = name.to_lowercase();
    let normalized: Vec<Value> = match lname.as_str() {
        "testimonials" => items.into_iter().map(normalize_testimonial).collect(),
        "navigation" | "menu" | "links" | "socials" => {
            items.into_iter().map(normalize_nav_item).collect()
        }
        "buttons" | "ctas" => items.into_iter().map(normalize_button).collect(),
        "items" | "services" | "features" | "plans" | "stats" | "members" => {
            items.into_iter().map(normalize_card).collect()
        }
        _ => items
            .into_iter()
            .map(|v| match v {
                Value::Object(o) => Value::Object(clean_object(o)),
                Value::Array(a) => normalize_array(&lname, a),
                Value::String(s) => Value::String(s),
                Value::Null => Value::String(String::new()),
                other => Value::String(primitive_to_string(&other)),
            })
            .collect(),
    };
    Value::Array(normalized)
}

fn normalize_testimonial(v: Value) -> Value {
    match v {
        Value::Object(o) => json!({
            "name": str_field(&o, &["name", "author"]),
            "role": str_field(&o, &["role", "title", "position"]),
            "content": str_field(&o, &["content", "text", "quote"]),
            "rating": rating_field(&o),
            "image": str_field(&o, &["image", "avatar", "photo"]),
            "company": str_field(&o, &["company", "organization"]),
        }),
        Value::String(s) => json!({
            "name": "", "role": "", "content": s, "rating": 5, "image": "", "company": ""
        }),
        _ => json!({
            "name": "", "role": "", "content": "", "rating": 5, "image": "", "company": ""
        }),
    }
}

fn normalize_nav_item(v: Value) -> Value {
    match v {
        Value::Object(o) => {
            let mut href = str_field(&o, &["href", "link", "url"]);
            if href.is_empty() {
                href = "#".to_string();
            }
            let mut out = Map::new();
            out.insert("label".into(), str_field(&o, &["label", "title", "name", "text"]).into());
            out.insert("href".into(), Value::String(href));
            if let Some(Value::Array(children)) = o.get("children") {
                out.insert(
                    "children".into(),
                    Value::Array(children.iter().cloned().map(normalize_nav_item).collect()),
                );
            }
            Value::Object(out)
        }
        Value::String(s) => json!({ "label": s, "href": "#" }),
        _ => json!({ "label": "", "href": "#" }),
    }
}

fn normalize_button(v: Value) -> Value {
    match v {
        Value::Object(o) => {
            let mut href = str_field(&o, &["href", "link", "url"]);
            if href.is_empty() {
                href = "#".to_string();
            }
            json!({
                "label": str_field(&o, &["label", "title", "text", "ctaText"]),
                "href": href,
            })
        }
        Value::String(s) => json!({ "label": s, "href": "#" }),
        _ => json!({ "label": "", "href": "#" }),
    }
}

/// Canonical card: guaranteed title/description, selected extras preserved.
fn normalize_card(v: Value) -> Value {
    match v {
        Value::Object(o) => {
            let mut out = Map::new();
            out.insert("title".into(), str_field(&o, &["title", "name", "label", "heading"]).into());
            out.insert(
                "description".into(),
                str_field(&o, &["description", "text", "content", "details"]).into(),
            );
            for key in ["icon", "image", "price", "href"] {
                if let Some(val) = o.get(key) {
                    if !val.is_null() {
                        out.insert(key.into(), clean_value(key, val.clone(), None));
                    }
                }
            }
            Value::Object(out)
        }
        Value::String(s) => json!({ "title": s, "description": "" }),
        _ => json!({ "title": "", "description": "" }),
    }
}

fn str_field(o: &Map<String, Value>, keys: &[&str]) -> String {
    for k in keys {
        match o.get(*k) {
            Some(Value::String(s)) => return s.clone(),
            Some(Value::Number(n)) => return n.to_string(),
            Some(Value::Bool(b)) => return b.to_string(),
            _ => {}
        }
    }
    String::new()
}

/// Rating clamped into [0, 5]; anything unreadable becomes 5.
fn rating_field(o: &Map<String, Value>) -> Value {
    let r = match o.get("rating") {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(5.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(5.0),
        _ => 5.0,
    };
    number_value(r.clamp(0.0, 5.0))
}

fn number_value(f: f64) -> Value {
    if f.fract() == 0.0 {
        Value::Number((f as i64).into())
    } else {
        serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or_else(|| Value::Number(0.into()))
    }
}

fn primitive_to_string(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

fn coerce_primitive(name: &str, value: Value, kind: Option<PropKind>) -> Value {
    match kind {
        Some(PropKind::Number) => match value {
            Value::Number(n) => Value::Number(n),
            Value::String(s) => s
                .trim()
                .parse::<f64>()
                .map(number_value)
                .unwrap_or_else(|_| Value::Number(0.into())),
            Value::Bool(b) => Value::Number(i64::from(b).into()),
            _ => Value::Number(0.into()),
        },
        Some(PropKind::Boolean) => match value {
            Value::Bool(b) => Value::Bool(b),
            Value::String(s) => {
                let t = s.trim().to_lowercase();
                Value::Bool(t == "true" || t == "yes" || t == "1")
            }
            Value::Number(n) => Value::Bool(n.as_f64() == Some(1.0)),
            _ => Value::Bool(false),
        },
        _ => match value {
            Value::String(s) => Value::String(s),
            // Untyped numerics survive only when the name itself says numeric.
            Value::Number(n) if has_numeric_name(name) => Value::Number(n),
            Value::Bool(b) if has_numeric_name(name) => Value::Bool(b),
            Value::Number(n) => Value::String(n.to_string()),
            Value::Bool(b) => Value::String(b.to_string()),
            Value::Null => Value::String(String::new()),
            other => other,
        },
    }
}

fn has_numeric_name(name: &str) -> bool {
    let l = name.to_lowercase();
    NUMERIC_NAMES.iter().any(|n| l.contains(n))
}

/// ========================================
/// Step 5: minimum-count backfill
/// ========================================

pub fn backfill(
    sections: &mut Vec<Section>,
    params: &GenerationParams,
    registry: &SchemaRegistry,
    kb: &KnowledgeBase,
    warnings: &mut Vec<String>,
) {
    let min = params.component_count;
    if sections.len() >= min {
        return;
    }

    let profile = kb.get(&params.industry);
    let mut used: HashSet<String> = sections
        .iter()
        .map(|s| s.component.to_lowercase())
        .collect();

    let mut preferred: Vec<&str> = profile.industry_components.to_vec();
    preferred.extend(profile.optional_components);

    for tpl in preferred {
        if sections.len() >= min {
            break;
        }
        if used.contains(&tpl.to_lowercase()) {
            continue;
        }
        let Some(schema) = registry.get(tpl) else {
            continue;
        };
        used.insert(schema.template_name.to_lowercase());
        warnings.push(format!("backfilled {} to reach the section minimum", schema.template_name));
        sections.push(synthesize(schema, params, kb));
    }

    for cat in CATEGORY_PRIORITY {
        if sections.len() >= min {
            break;
        }
        for schema in registry.all().iter().filter(|s| s.category == *cat) {
            if sections.len() >= min {
                break;
            }
            if used.contains(&schema.template_name.to_lowercase()) {
                continue;
            }
            used.insert(schema.template_name.to_lowercase());
            warnings.push(format!("backfilled {} to reach the section minimum", schema.template_name));
            sections.push(synthesize(schema, params, kb));
        }
    }
}

fn synthesize(schema: &ComponentSchema, params: &GenerationParams, kb: &KnowledgeBase) -> Section {
    let mut props = schema.default_props.clone();
    let (title, subtitle) = kb
        .section_copy(&params.industry, schema.template_name)
        .map(|(t, s)| (t.to_string(), s.to_string()))
        .unwrap_or_else(|| {
            kb.generic_copy(schema.template_name, &params.website_name, &params.industry)
        });
    props.insert("title".into(), title.into());
    props.insert("subtitle".into(), subtitle.into());
    Section {
        component: schema.template_name.to_string(),
        variant: "default".into(),
        props,
    }
}

/// ========================================
/// Step 6: ordering
/// ========================================

/// Headers to the front in encountered order, heroes immediately after,
/// footers to the end; everything else keeps its relative order between.
pub fn reorder(sections: Vec<Section>) -> Vec<Section> {
    let mut headers = Vec::new();
    let mut heroes = Vec::new();
    let mut middle = Vec::new();
    let mut footers = Vec::new();
    for s in sections {
        let t = s.component.to_lowercase();
        if t.contains("header") {
            headers.push(s);
        } else if t.contains("hero") {
            heroes.push(s);
        } else if t.contains("footer") {
            footers.push(s);
        } else {
            middle.push(s);
        }
    }
    headers
        .into_iter()
        .chain(heroes)
        .chain(middle)
        .chain(footers)
        .collect()
}

/// Upper half of the count contract: at most `component_count + 3` sections.
/// Surplus comes off the back of the middle block so the page keeps its
/// header, hero and footer.
fn clamp_count(sections: &mut Vec<Section>, max: usize, warnings: &mut Vec<String>) {
    let mut i = sections.len();
    while sections.len() > max && i > 0 {
        i -= 1;
        let t = sections[i].component.to_lowercase();
        if t.contains("header") || t.contains("hero") || t.contains("footer") {
            continue;
        }
        warnings.push(format!("dropped surplus section {}", sections[i].component));
        sections.remove(i);
    }
}

/// ========================================
/// Step 7: metadata & color finalization
/// ========================================

fn finalize(
    sections: Vec<Section>,
    parsed: &Value,
    params: &GenerationParams,
    kb: &KnowledgeBase,
) -> GeneratedWebsite {
    let profile = kb.get(&params.industry);
    let meta = parsed.get("metadata").and_then(Value::as_object);

    let title = meta
        .and_then(|m| m.get("title"))
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| default_title(params, profile));
    let description = meta
        .and_then(|m| m.get("description"))
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| default_description(params, profile));
    let keywords = meta
        .and_then(|m| m.get("keywords"))
        .and_then(Value::as_array)
        .map(|a| {
            a.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default_keywords(params, profile));

    GeneratedWebsite {
        success: true,
        metadata: SiteMetadata {
            title,
            description,
            keywords,
            industry: profile.key.to_string(),
            style: params.style.clone(),
            components_used: sections.len(),
        },
        colors: palette_from(parsed.get("colors"), params, kb),
        sections,
        generated_at: Utc::now(),
        generated_by: String::new(),
        message: None,
    }
}

fn default_title(params: &GenerationParams, profile: &IndustryProfile) -> String {
    if params.website_name.is_empty() {
        profile.display_name.to_string()
    } else {
        format!("{} | {}", params.website_name, profile.taglines[0])
    }
}

fn default_description(params: &GenerationParams, profile: &IndustryProfile) -> String {
    if params.description.is_empty() {
        profile.taglines[0].to_string()
    } else {
        params.description.clone()
    }
}

fn default_keywords(params: &GenerationParams, profile: &IndustryProfile) -> Vec<String> {
    let mut kw = vec![profile.key.to_string(), params.style.clone()];
    if !params.website_name.is_empty() {
        kw.push(params.website_name.clone());
    }
    kw
}

/// Model-supplied colors win field by field; the static table fills the rest.
fn palette_from(colors: Option<&Value>, params: &GenerationParams, kb: &KnowledgeBase) -> Palette {
    let mut p = kb.palette(&params.industry, &params.style);
    if let Some(Value::Object(o)) = colors {
        for (field, slot) in [
            ("primary", &mut p.primary as &mut String),
            ("secondary", &mut p.secondary),
            ("accent", &mut p.accent),
            ("background", &mut p.background),
            ("text", &mut p.text),
        ] {
            if let Some(v) = o.get(field).and_then(Value::as_str) {
                if !v.is_empty() {
                    *slot = v.to_string();
                }
            }
        }
    }
    p
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (SchemaRegistry, KnowledgeBase) {
        (SchemaRegistry::new(), KnowledgeBase::new())
    }

    fn params(industry: &str, count: usize) -> GenerationParams {
        GenerationParams {
            website_name: "Luigi's".into(),
            industry: industry.into(),
            description: "A cozy Italian bistro".into(),
            style: "modern".into(),
            target_audience: "families".into(),
            goals: vec![],
            unique_selling_points: vec![],
            component_count: count,
        }
    }

    fn run(raw: &str, industry: &str, count: usize) -> (GeneratedWebsite, Vec<String>) {
        let (reg, kb) = setup();
        parse_and_repair(raw, &params(industry, count), &reg, &kb).unwrap()
    }

    #[test]
    fn extracts_fenced_block_with_trailing_prose() {
        let raw = "Here is your website:\n```json\n{\"components\":[{\"type\":\"HeroBanner\",\"props\":{}}]}\n```\nLet me know if you need changes!";
        let (site, _) = run(raw, "technology", 1);
        assert!(site.success);
        assert_eq!(site.sections[0].component, "HeroBanner");
    }

    #[test]
    fn extracts_bare_braces_between_prose() {
        let raw = "Sure! {\"components\":[{\"type\":\"HeroBanner\",\"props\":{}}]} Hope that helps.";
        let (site, _) = run(raw, "technology", 1);
        assert_eq!(site.sections[0].component, "HeroBanner");
    }

    #[test]
    fn no_braces_is_a_hard_failure() {
        let (reg, kb) = setup();
        let err = parse_and_repair("I could not produce JSON, sorry.", &params("technology", 10), &reg, &kb)
            .unwrap_err();
        assert!(matches!(err, GenerateError::MalformedResponse(_)));
    }

    #[test]
    fn invalid_json_is_a_hard_failure() {
        let (reg, kb) = setup();
        let err = parse_and_repair("{\"components\": [", &params("technology", 10), &reg, &kb).unwrap_err();
        assert!(matches!(err, GenerateError::MalformedResponse(_)));
    }

    #[test]
    fn missing_components_array_is_a_hard_failure() {
        let (reg, kb) = setup();
        for raw in ["{\"metadata\": {}}", "{\"components\": \"none\"}"] {
            let err = parse_and_repair(raw, &params("technology", 10), &reg, &kb).unwrap_err();
            assert!(matches!(err, GenerateError::MalformedResponse(_)));
        }
    }

    #[test]
    fn defaults_are_merged_under_supplied_props() {
        let raw = serde_json::to_string(&json!({
            "components": [
                {"type": "HeroBanner", "props": {"title": "Benvenuti"}}
            ]
        }))
        .unwrap();
        let (site, _) = run(&raw, "restaurant", 1);
        let hero = &site.sections[0];
        assert_eq!(hero.props["title"], json!("Benvenuti"));
        // Every default key survives, even the ones the model never sent.
        let (reg, _) = setup();
        let schema = reg.get("HeroBanner").unwrap();
        for key in schema.default_props.keys() {
            assert!(hero.props.contains_key(key), "missing default prop {key}");
        }
    }

    #[test]
    fn null_never_overrides_a_default() {
        let raw = serde_json::to_string(&json!({
            "components": [
                {"type": "HeroBanner", "props": {"ctaText": null}}
            ]
        }))
        .unwrap();
        let (site, _) = run(&raw, "technology", 1);
        assert_eq!(site.sections[0].props["ctaText"], json!("Learn More"));
    }

    #[test]
    fn testimonials_are_normalized_and_ratings_clamped() {
        let raw = serde_json::to_string(&json!({
            "components": [
                {"type": "TestimonialCarousel", "props": {"testimonials": [
                    {"author": "Ana", "position": "Chef", "quote": "Wonderful", "rating": 7},
                    {"name": "Bo", "rating": -2},
                    "Just a plain quote"
                ]}}
            ]
        }))
        .unwrap();
        let (site, _) = run(&raw, "restaurant", 1);
        let ts = site.sections[0].props["testimonials"].as_array().unwrap();
        assert_eq!(ts[0]["name"], json!("Ana"));
        assert_eq!(ts[0]["role"], json!("Chef"));
        assert_eq!(ts[0]["content"], json!("Wonderful"));
        assert_eq!(ts[0]["rating"], json!(5));
        assert_eq!(ts[1]["rating"], json!(0));
        assert_eq!(ts[2]["content"], json!("Just a plain quote"));
        for t in ts {
            for key in ["name", "role", "content", "rating", "image", "company"] {
                assert!(t.get(key).is_some(), "testimonial missing {key}");
            }
        }
    }

    #[test]
    fn navigation_items_get_label_href_and_recursed_children() {
        let raw = serde_json::to_string(&json!({
            "components": [
                {"type": "ModernHeader", "props": {"navigation": [
                    {"title": "Home", "url": "#home"},
                    {"label": "More", "children": [{"name": "Deep"}]},
                    "Contact"
                ]}}
            ]
        }))
        .unwrap();
        let (site, _) = run(&raw, "technology", 1);
        let nav = site.sections[0].props["navigation"].as_array().unwrap();
        assert_eq!(nav[0], json!({"label": "Home", "href": "#home"}));
        assert_eq!(nav[1]["children"][0], json!({"label": "Deep", "href": "#"}));
        assert_eq!(nav[2], json!({"label": "Contact", "href": "#"}));
    }

    #[test]
    fn primitives_coerce_by_schema_hint() {
        let raw = serde_json::to_string(&json!({
            "components": [
                {"type": "HeroBanner", "props": {"overlay": "true", "title": 42}},
                {"type": "FeatureGrid", "props": {"columns": "4"}},
                {"type": "AboutSection", "props": {"yearsActive": "not-a-number"}}
            ]
        }))
        .unwrap();
        let (site, _) = run(&raw, "technology", 3);
        let by_type = |t: &str| {
            site.sections
                .iter()
                .find(|s| s.component == t)
                .unwrap()
                .props
                .clone()
        };
        assert_eq!(by_type("HeroBanner")["overlay"], json!(true));
        assert_eq!(by_type("HeroBanner")["title"], json!("42"));
        assert_eq!(by_type("FeatureGrid")["columns"], json!(4));
        assert_eq!(by_type("AboutSection")["yearsActive"], json!(0));
    }

    #[test]
    fn numeric_names_pass_through_without_a_hint() {
        let raw = serde_json::to_string(&json!({
            "components": [
                {"type": "MenuSection", "props": {"items": [
                    {"title": "Tagliatelle", "description": "With ragu", "price": 18}
                ]}}
            ]
        }))
        .unwrap();
        let (site, _) = run(&raw, "restaurant", 1);
        let items = site.sections[0].props["items"].as_array().unwrap();
        assert_eq!(items[0]["price"], json!(18));
    }

    #[test]
    fn unknown_type_repairs_to_category_match() {
        let (reg, _) = setup();
        match resolve_schema(&reg, "TestimonialsSection", "restaurant") {
            Resolution::Repaired(s) => assert_eq!(s.template_name, "TestimonialCarousel"),
            _ => panic!("expected a repaired resolution"),
        }
        match resolve_schema(&reg, "HeroBanner", "restaurant") {
            Resolution::Known(_) => {}
            _ => panic!("known types pass through"),
        }
    }

    #[test]
    fn empty_registry_yields_not_found() {
        let reg = SchemaRegistry::empty();
        assert!(matches!(
            resolve_schema(&reg, "Anything", "technology"),
            Resolution::NotFound
        ));
    }

    #[test]
    fn unreal_component_never_throws_and_page_is_backfilled() {
        let raw = "{\"components\":[{\"type\":\"NotARealComponent\",\"props\":{}}]}";
        let (site, warnings) = run(raw, "technology", 10);
        assert!(site.success);
        assert!(site.sections.len() >= 10);
        assert!(site.sections.len() <= 13);
        assert!(warnings.iter().any(|w| w.contains("NotARealComponent")));
        // Every surviving type resolves to a known schema.
        let (reg, _) = setup();
        for s in &site.sections {
            assert!(reg.get(&s.component).is_some(), "orphaned type {}", s.component);
        }
    }

    #[test]
    fn undercount_is_backfilled_into_the_contract_range() {
        // Scenario: 5 valid components returned, 12 requested.
        let raw = serde_json::to_string(&json!({
            "components": [
                {"type": "ModernHeader", "props": {}},
                {"type": "HeroBanner", "props": {}},
                {"type": "AboutSection", "props": {}},
                {"type": "ContactForm", "props": {}},
                {"type": "SimpleFooter", "props": {}}
            ]
        }))
        .unwrap();
        let (site, _) = run(&raw, "restaurant", 12);
        assert!(site.sections.len() >= 12 && site.sections.len() <= 15);
        assert_eq!(site.metadata.components_used, site.sections.len());
        // Industry sections were preferred for the backfill.
        assert!(site.sections.iter().any(|s| s.component == "MenuSection"));
    }

    #[test]
    fn backfilled_sections_carry_curated_or_generic_copy() {
        let raw = "{\"components\":[]}";
        let (site, _) = run(raw, "restaurant", 10);
        let menu = site.sections.iter().find(|s| s.component == "MenuSection").unwrap();
        assert_eq!(menu.props["title"], json!("Our Menu"));
        let generic = site
            .sections
            .iter()
            .find(|s| s.props.get("subtitle").map(|v| v == &json!("Explore the best of Luigi's for your restaurant needs")).unwrap_or(false));
        assert!(generic.is_some(), "at least one section uses the generic pattern");
    }

    #[test]
    fn ordering_puts_headers_first_heroes_next_footers_last() {
        let raw = serde_json::to_string(&json!({
            "components": [
                {"type": "CtaBanner", "props": {}},
                {"type": "SimpleFooter", "props": {}},
                {"type": "HeroBanner", "props": {}},
                {"type": "ModernHeader", "props": {}},
                {"type": "AboutSection", "props": {}}
            ]
        }))
        .unwrap();
        let (site, _) = run(&raw, "technology", 5);
        let order: Vec<_> = site.sections.iter().map(|s| s.component.as_str()).collect();
        assert_eq!(
            order,
            vec!["ModernHeader", "HeroBanner", "CtaBanner", "AboutSection", "SimpleFooter"]
        );
    }

    #[test]
    fn overcount_is_clamped_preserving_shell() {
        let mut components = vec![json!({"type": "ModernHeader", "props": {}}), json!({"type": "HeroBanner", "props": {}})];
        for _ in 0..10 {
            components.push(json!({"type": "CtaBanner", "props": {}}));
            components.push(json!({"type": "AboutSection", "props": {}}));
        }
        components.push(json!({"type": "SimpleFooter", "props": {}}));
        let raw = serde_json::to_string(&json!({ "components": components })).unwrap();
        let (site, warnings) = run(&raw, "technology", 10);
        assert_eq!(site.sections.len(), 13);
        assert_eq!(site.sections[0].component, "ModernHeader");
        assert_eq!(site.sections[1].component, "HeroBanner");
        assert_eq!(site.sections.last().unwrap().component, "SimpleFooter");
        assert!(warnings.iter().any(|w| w.contains("surplus")));
    }

    #[test]
    fn metadata_and_colors_come_from_the_response_when_present() {
        let raw = serde_json::to_string(&json!({
            "components": [{"type": "HeroBanner", "props": {}}],
            "metadata": {"title": "Luigi's Bistro", "description": "Fresh pasta daily", "keywords": ["pasta", "bistro"]},
            "colors": {"primary": "#101010"}
        }))
        .unwrap();
        let (site, _) = run(&raw, "restaurant", 1);
        assert_eq!(site.metadata.title, "Luigi's Bistro");
        assert_eq!(site.metadata.keywords, vec!["pasta", "bistro"]);
        assert_eq!(site.colors.primary, "#101010");
        // Missing fields fall back to the industry table.
        let kb = KnowledgeBase::new();
        assert_eq!(site.colors.secondary, kb.palette("restaurant", "modern").secondary);
    }

    #[test]
    fn repair_is_idempotent() {
        let raw = serde_json::to_string(&json!({
            "components": [
                {"type": "ClassicHeader", "props": {"logo": "Luigi's"}},
                {"type": "HeroSection", "props": {"title": "Benvenuti", "overlay": "yes"}},
                {"type": "MenuSection", "props": {"items": [{"name": "Gnocchi", "price": "14"}]}},
                {"type": "SimpleFooter", "props": {}}
            ]
        }))
        .unwrap();
        let p = params("restaurant", 8);
        let (reg, kb) = setup();
        let (first, _) = parse_and_repair(&raw, &p, &reg, &kb).unwrap();

        let roundtrip = serde_json::to_string(&json!({
            "components": first.sections,
            "metadata": {
                "title": first.metadata.title,
                "description": first.metadata.description,
                "keywords": first.metadata.keywords,
            },
            "colors": first.colors,
        }))
        .unwrap();
        let (second, _) = parse_and_repair(&roundtrip, &p, &reg, &kb).unwrap();

        assert_eq!(first.sections, second.sections);
        assert_eq!(first.metadata, second.metadata);
        assert_eq!(first.colors, second.colors);
    }
}
