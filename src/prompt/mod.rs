use crate::registry::{ComponentSchema, PropKind};
use crate::wire::{GenerationParams, RetrievedDocument};

/// Catalog entries shown to the model. The registry is small today, but the
/// prompt must not grow unbounded if it isn't tomorrow.
const CATALOG_LIMIT: usize = 30;

fn content_guidelines() -> &'static str {
    r##"Content Guidelines:
- Copy must be realistic and specific to the business described (no lorem ipsum, no placeholder text).
- Write section titles that sound like the business, not like a template.
- Every list item needs a title and a description; prices are plain numbers without currency symbols.
- Reuse the business name naturally; do not invent a different name.
- Navigation links use anchor hrefs like "#about"; never leave an href empty.
- Testimonials need a plausible name, role and a rating from 0 to 5."##
}

/// The JSON shape the response parser is written against. Changing this
/// contract requires changing the parser in lockstep.
fn output_contract(min: usize, max: usize) -> String {
    format!(
        r##"Output Contract (MANDATORY):
Return ONLY one JSON object, no markdown fences, no prose before or after, shaped exactly:

{{
  "components": [
    {{ "type": "<template name from the catalog>", "props": {{ ... }} }}
  ],
  "metadata": {{ "title": string, "description": string, "keywords": [string] }},
  "colors": {{ "primary": "#hex", "secondary": "#hex", "accent": "#hex", "background": "#hex", "text": "#hex" }}
}}

- "components" must contain between {min} and {max} entries.
- Every "type" must be a template name listed in the component catalog.
- Begin with exactly one header component and end with exactly one footer component.
- Include exactly one hero component immediately after the header.
- Props you omit fall back to the catalog defaults; only set props you can fill with real content."##
    )
}

fn business_block(params: &GenerationParams) -> String {
    let goals = if params.goals.is_empty() {
        "(not specified)".to_string()
    } else {
        params.goals.join("; ")
    };
    let usps = if params.unique_selling_points.is_empty() {
        "(not specified)".to_string()
    } else {
        params.unique_selling_points.join("; ")
    };
    format!(
        "Business Facts:\n\
         - Name: {name}\n\
         - Industry: {industry}\n\
         - Description: {description}\n\
         - Visual style: {style}\n\
         - Target audience: {audience}\n\
         - Goals: {goals}\n\
         - Unique selling points: {usps}",
        name = params.website_name,
        industry = params.industry,
        description = params.description,
        style = params.style,
        audience = params.target_audience,
        goals = goals,
        usps = usps,
    )
}

fn knowledge_block(docs: &[RetrievedDocument]) -> String {
    if docs.is_empty() {
        return "Industry Knowledge: (none retrieved)".to_string();
    }
    let mut s = String::from("Industry Knowledge (use this to ground the copy):\n");
    for d in docs {
        s.push_str(&format!(
            "### {title}\n{content}\nTags: {tags}\n",
            title = d.title,
            content = d.content,
            tags = d.tags.join(", "),
        ));
    }
    s
}

fn catalog_block(schemas: &[ComponentSchema]) -> String {
    let mut s = String::from("Component Catalog (the only valid \"type\" values):\n");
    for schema in schemas.iter().take(CATALOG_LIMIT) {
        let props = schema
            .prop_types
            .iter()
            .map(|(n, k)| format!("{n}: {}", prop_kind_name(*k)))
            .collect::<Vec<_>>()
            .join(", ");
        let defaults = serde_json::to_string(&schema.default_props).unwrap_or_else(|_| "{}".into());
        s.push_str(&format!(
            "- {name} (category: {category}; industries: {industries})\n  {description}\n  props: {props}\n  defaults: {defaults}\n",
            name = schema.template_name,
            category = schema.category,
            industries = schema.industries.join(", "),
            description = schema.description,
        ));
    }
    if schemas.len() > CATALOG_LIMIT {
        s.push_str(&format!("({} further components omitted)\n", schemas.len() - CATALOG_LIMIT));
    }
    s
}

fn prop_kind_name(kind: PropKind) -> &'static str {
    match kind {
        PropKind::Text => "text",
        PropKind::Number => "number",
        PropKind::Boolean => "boolean",
        PropKind::List => "list",
        PropKind::Object => "object",
    }
}

/// Assemble the full instruction for one generation attempt. Pure string
/// templating; the load-bearing part is the output contract above.
pub fn build_prompt(
    params: &GenerationParams,
    docs: &[RetrievedDocument],
    schemas: &[ComponentSchema],
) -> String {
    let min = params.component_count;
    let max = params.component_count + 3;
    format!(
        "You are a website architect. Design a complete multi-section marketing website \
         for the business below, selecting components from the catalog and writing all copy.\n\n\
         {business}\n\n{knowledge}\n{catalog}\n{guidelines}\n\n{contract}",
        business = business_block(params),
        knowledge = knowledge_block(docs),
        catalog = catalog_block(schemas),
        guidelines = content_guidelines(),
        contract = output_contract(min, max),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::SchemaRegistry;

    fn params() -> GenerationParams {
        GenerationParams {
            website_name: "Luigi's".into(),
            industry: "restaurant".into(),
            description: "A cozy Italian bistro".into(),
            style: "classic".into(),
            target_audience: "families".into(),
            goals: vec!["more reservations".into()],
            unique_selling_points: vec!["wood-fired oven".into()],
            component_count: 10,
        }
    }

    #[test]
    fn prompt_carries_facts_and_contract() {
        let reg = SchemaRegistry::new();
        let p = build_prompt(&params(), &[], reg.all());
        assert!(p.contains("Luigi's"));
        assert!(p.contains("cozy Italian bistro"));
        assert!(p.contains("wood-fired oven"));
        assert!(p.contains("\"components\""));
        assert!(p.contains("between 10 and 13 entries"));
    }

    #[test]
    fn catalog_lists_templates_and_defaults() {
        let reg = SchemaRegistry::new();
        let p = build_prompt(&params(), &[], reg.all());
        assert!(p.contains("- MenuSection"));
        assert!(p.contains("props: title: text"));
        assert!(p.contains("defaults: {"));
    }

    #[test]
    fn documents_are_embedded() {
        let reg = SchemaRegistry::new();
        let docs = vec![RetrievedDocument {
            title: "Doc title".into(),
            content: "Doc body".into(),
            industry: "restaurant".into(),
            tags: vec!["menu".into()],
            score: Some(1.0),
        }];
        let p = build_prompt(&params(), &docs, reg.all());
        assert!(p.contains("### Doc title"));
        assert!(p.contains("Doc body"));
    }
}
