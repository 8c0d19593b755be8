use scraper::{Html, Selector};
use serde_json::Value;

/// Finds the article text in JSON-LD metadata. Prefers `articleBody` over `description`.
pub fn extract_article_body(document: &Html) -> Option<String> {
    let documents = ld_json_values(document);

    ["articleBody", "description"].iter().find_map(|key| {
        documents
            .iter()
            .find_map(|json| find_string(json, key))
    })
}

fn ld_json_values(document: &Html) -> Vec<Value> {
    let mut values = Vec::new();

    if let Ok(script_selector) = Selector::parse("script[type='application/ld+json']") {
        for script in document.select(&script_selector) {
            if let Ok(json) = serde_json::from_str::<Value>(script.text().collect::<String>().trim()) {
                values.push(json);
            }
        }
    }

    values
}

fn find_string(json: &Value, key: &str) -> Option<String> {
    match json {
        Value::Array(arr) => arr.iter().find_map(|item| find_string(item, key)),
        Value::Object(obj) => {
            if let Some(text) = obj.get(key).and_then(|v| v.as_str()) {
                let text = text.trim();
                if !text.is_empty() {
                    return Some(text.to_string());
                }
            }
            obj.get("@graph").and_then(|graph| find_string(graph, key))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_body_preferred() {
        let html = r#"
            <script type="application/ld+json">{"@type": "WebPage", "description": "Page description"}</script>
            <script type="application/ld+json">{"@type": "NewsArticle", "articleBody": "Full body text"}</script>
        "#;
        let document = Html::parse_document(html);
        assert_eq!(extract_article_body(&document).unwrap(), "Full body text");
    }

    #[test]
    fn test_graph_and_description_fallback() {
        let html = r#"
            <script type="application/ld+json">
                {"@context": "https://schema.org", "@graph": [{"@type": "NewsArticle", "description": " Short summary "}]}
            </script>
        "#;
        let document = Html::parse_document(html);
        assert_eq!(extract_article_body(&document).unwrap(), "Short summary");
    }

    #[test]
    fn test_missing_or_invalid_json() {
        let document = Html::parse_document(r#"<script type="application/ld+json">{not json</script>"#);
        assert!(extract_article_body(&document).is_none());
        assert!(extract_article_body(&Html::parse_document("<p>hi</p>")).is_none());
    }
}
