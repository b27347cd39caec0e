//! Response parsing for search providers.
//!
//! Each provider has an ordered chain of rules. A rule returns `Some` when it
//! recognises the body, and the first match wins. Every chain ends with a
//! summary of the body so that parsing always yields at least one string.

use scraper::{Html, Selector};
use serde::Deserialize;
use serde_json::Value;
use std::sync::LazyLock;

/// Titles kept from generic JSON, RSS and HTML results.
const MAX_RESULTS: usize = 10;

/// Entries kept from DuckDuckGo `organic` and `RelatedTopics`.
const MAX_DDG_RESULTS: usize = 5;

/// Characters of a DuckDuckGo topic kept before an ellipsis is added.
const TOPIC_TEXT_LIMIT: usize = 100;

static RSS_ITEM_TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("item title").expect("invalid selector"));
static HTML_HEADING: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h3").expect("invalid selector"));

/// HTTP response handed to a parser.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub reason: String,
    pub body: String,
}

type Rule = fn(&RawResponse, &str) -> Option<Vec<String>>;

const GENERIC_CHAIN: &[Rule] = &[json_rules];
const GOOGLE_CHAIN: &[Rule] = &[json_rules, html_headings];
const BING_CHAIN: &[Rule] = &[rss_titles, json_rules];
const DUCKDUCKGO_CHAIN: &[Rule] = &[duckduckgo];

/// Parser chain selected by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseParser {
    /// JSON field rules only.
    Generic,
    /// JSON field rules, then `<h3>` headings from an HTML page.
    Google,
    /// RSS item titles, then JSON field rules.
    Bing,
    /// DuckDuckGo Instant Answer API.
    DuckDuckGo,
}

impl ResponseParser {
    fn rules(self) -> &'static [Rule] {
        match self {
            ResponseParser::Generic => GENERIC_CHAIN,
            ResponseParser::Google => GOOGLE_CHAIN,
            ResponseParser::Bing => BING_CHAIN,
            ResponseParser::DuckDuckGo => DUCKDUCKGO_CHAIN,
        }
    }

    /// Turn a successful response into result strings. Never returns an empty list.
    pub fn parse(self, response: &RawResponse, query: &str) -> Vec<String> {
        self.rules()
            .iter()
            .find_map(|rule| rule(response, query))
            .unwrap_or_else(|| vec![non_json_summary(&response.body, query)])
    }
}

fn non_json_summary(body: &str, query: &str) -> String {
    format!(
        "Search completed for '{}' - received {} characters of non-JSON content",
        query,
        body.chars().count()
    )
}

/// One array in a JSON body and the fields tried, in order, for each entry's title.
struct JsonRule {
    array: &'static str,
    fields: &'static [&'static str],
}

const JSON_RULES: &[JsonRule] = &[
    JsonRule { array: "organic", fields: &["title", "name", "snippet"] },
    JsonRule { array: "results", fields: &["title", "name", "snippet"] },
];

impl JsonRule {
    /// `None` if the array is missing or empty; otherwise the titles of its object entries.
    fn apply(&self, json: &Value) -> Option<Vec<String>> {
        let entries = json.get(self.array)?.as_array().filter(|a| !a.is_empty())?;

        Some(
            entries
                .iter()
                .take(MAX_RESULTS)
                .filter(|entry| entry.is_object())
                .map(|entry| first_text(entry, self.fields).unwrap_or_else(|| "No title".to_string()))
                .collect(),
        )
    }
}

fn first_text(entry: &Value, fields: &[&str]) -> Option<String> {
    fields
        .iter()
        .filter_map(|field| entry.get(*field).and_then(Value::as_str))
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

/// Decode the body as JSON and try each [`JsonRule`] in turn.
///
/// Declines (returns `None`) only when the body is not JSON.
fn json_rules(response: &RawResponse, query: &str) -> Option<Vec<String>> {
    let json: Value = serde_json::from_str(&response.body).ok()?;

    for rule in JSON_RULES {
        if let Some(titles) = rule.apply(&json) {
            if titles.is_empty() {
                return Some(vec![format!(
                    "Search completed for '{}' - {} array found but no titles extracted",
                    query, rule.array
                )]);
            }
            return Some(titles);
        }
    }

    Some(vec![format!("Search completed for '{}' - no organic or results array found in response", query)])
}

fn rss_titles(response: &RawResponse, _query: &str) -> Option<Vec<String>> {
    if !response.body.contains("<item") {
        return None;
    }

    let document = Html::parse_document(&response.body);
    let titles: Vec<String> = document
        .select(&RSS_ITEM_TITLE)
        .map(|el| strip_cdata(el.text().collect::<String>().trim()).to_string())
        .filter(|t| !t.is_empty())
        .take(MAX_RESULTS)
        .collect();

    if titles.is_empty() { None } else { Some(titles) }
}

fn strip_cdata(text: &str) -> &str {
    text.strip_prefix("<![CDATA[")
        .and_then(|t| t.strip_suffix("]]>"))
        .map(str::trim)
        .unwrap_or(text)
}

fn html_headings(response: &RawResponse, _query: &str) -> Option<Vec<String>> {
    let document = Html::parse_document(&response.body);
    let headings: Vec<String> = document
        .select(&HTML_HEADING)
        .map(|el| el.text().collect::<Vec<_>>().join(" ").split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|t| !t.is_empty())
        .take(MAX_RESULTS)
        .collect();

    if headings.is_empty() { None } else { Some(headings) }
}

/// Fields of the DuckDuckGo Instant Answer API that carry results.
///
/// Any of them may be missing or `null`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct InstantAnswer {
    organic: Option<Vec<Value>>,
    #[serde(rename = "RelatedTopics")]
    related_topics: Option<Vec<Value>>,
    #[serde(rename = "Answer")]
    answer: Value,
    #[serde(rename = "Definition")]
    definition: Value,
}

fn duckduckgo(response: &RawResponse, query: &str) -> Option<Vec<String>> {
    let data = match serde_json::from_str::<InstantAnswer>(&response.body) {
        Ok(data) => data,
        Err(e) => return Some(vec![format!("Error parsing DuckDuckGo response: {}", e)]),
    };

    let mut results: Vec<String> = data
        .organic
        .iter()
        .flatten()
        .take(MAX_DDG_RESULTS)
        .filter(|entry| entry.is_object())
        .map(|entry| first_text(entry, &["title", "snippet"]).unwrap_or_else(|| "No title".to_string()))
        .collect();

    if results.is_empty() {
        results = data
            .related_topics
            .iter()
            .flatten()
            .take(MAX_DDG_RESULTS)
            .filter_map(|topic| topic.get("Text").and_then(Value::as_str))
            .map(truncate_topic)
            .collect();

        if let Some(answer) = non_empty_text(&data.answer) {
            results.insert(0, format!("Answer: {}", answer));
        }

        if let Some(definition) = non_empty_text(&data.definition) {
            results.insert(0, format!("Definition: {}", definition));
        }
    }

    if results.is_empty() {
        return Some(vec![format!("Search completed for '{}' - no specific results found", query)]);
    }

    Some(results)
}

/// Text of a truthy JSON value. Null, `false`, zero and empty values yield `None`.
fn non_empty_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::Array(a) if a.is_empty() => None,
        Value::Object(o) if o.is_empty() => None,
        other => Some(other.to_string()),
    }
}

fn truncate_topic(text: &str) -> String {
    if text.chars().count() > TOPIC_TEXT_LIMIT {
        let head: String = text.chars().take(TOPIC_TEXT_LIMIT).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(body: &str) -> RawResponse {
        RawResponse { status: 200, reason: "OK".into(), body: body.into() }
    }

    #[test]
    fn test_generic_organic_titles() {
        let results = ResponseParser::Generic.parse(&ok(r#"{"organic":[{"title":"A"},{"title":"B"}]}"#), "q");
        assert_eq!(results, vec!["A", "B"]);
    }

    #[test]
    fn test_generic_field_fallbacks() {
        let body = r#"{"organic":[{"name":"N"},{"snippet":"S"},{"url":"u"},"skip me"]}"#;
        let results = ResponseParser::Generic.parse(&ok(body), "q");
        assert_eq!(results, vec!["N", "S", "No title"]);
    }

    #[test]
    fn test_generic_results_array() {
        let body = r#"{"organic":[],"results":[{"title":"R1"},{"title":"R2"}]}"#;
        let results = ResponseParser::Generic.parse(&ok(body), "q");
        assert_eq!(results, vec!["R1", "R2"]);
    }

    #[test]
    fn test_generic_caps_at_ten() {
        let entries: Vec<String> = (0..25).map(|i| format!(r#"{{"title":"T{i}"}}"#)).collect();
        let body = format!(r#"{{"results":[{}]}}"#, entries.join(","));
        let results = ResponseParser::Generic.parse(&ok(&body), "q");
        assert_eq!(results.len(), 10);
        assert_eq!(results[9], "T9");
    }

    #[test]
    fn test_generic_no_known_array() {
        let results = ResponseParser::Generic.parse(&ok(r#"{"items":[1,2]}"#), "rust");
        assert_eq!(results, vec!["Search completed for 'rust' - no organic or results array found in response"]);
    }

    #[test]
    fn test_generic_entries_without_objects() {
        let results = ResponseParser::Generic.parse(&ok(r#"{"organic":["a","b"]}"#), "rust");
        assert_eq!(results, vec!["Search completed for 'rust' - organic array found but no titles extracted"]);
    }

    #[test]
    fn test_generic_results_entries_without_objects() {
        let results = ResponseParser::Generic.parse(&ok(r#"{"results":[1,2]}"#), "rust");
        assert_eq!(results, vec!["Search completed for 'rust' - results array found but no titles extracted"]);
    }

    #[test]
    fn test_generic_non_json() {
        let results = ResponseParser::Generic.parse(&ok("<html>héllo</html>"), "rust");
        assert_eq!(results, vec!["Search completed for 'rust' - received 18 characters of non-JSON content"]);
    }

    #[test]
    fn test_duckduckgo_answer_and_topics() {
        let body = r#"{"Answer":"42","RelatedTopics":[{"Text":"x"}]}"#;
        let results = ResponseParser::DuckDuckGo.parse(&ok(body), "q");
        assert_eq!(results, vec!["Answer: 42", "x"]);
    }

    #[test]
    fn test_duckduckgo_definition_goes_first() {
        let body = r#"{"Answer":"42","Definition":"the answer","RelatedTopics":[{"Text":"x"},{"Name":"group"}]}"#;
        let results = ResponseParser::DuckDuckGo.parse(&ok(body), "q");
        assert_eq!(results, vec!["Definition: the answer", "Answer: 42", "x"]);
    }

    #[test]
    fn test_duckduckgo_truncates_topics() {
        let long = "a".repeat(150);
        let body = format!(r#"{{"RelatedTopics":[{{"Text":"{}"}},{{"Text":"short"}}]}}"#, long);
        let results = ResponseParser::DuckDuckGo.parse(&ok(&body), "q");
        assert_eq!(results[0], format!("{}...", "a".repeat(100)));
        assert_eq!(results[1], "short");
    }

    #[test]
    fn test_duckduckgo_topic_limit() {
        let topics: Vec<String> = (0..8).map(|i| format!(r#"{{"Text":"t{i}"}}"#)).collect();
        let body = format!(r#"{{"RelatedTopics":[{}]}}"#, topics.join(","));
        let results = ResponseParser::DuckDuckGo.parse(&ok(&body), "q");
        assert_eq!(results, vec!["t0", "t1", "t2", "t3", "t4"]);
    }

    #[test]
    fn test_duckduckgo_organic_preferred() {
        let body = r#"{"organic":[{"snippet":"s1"}],"Answer":"ignored"}"#;
        let results = ResponseParser::DuckDuckGo.parse(&ok(body), "q");
        assert_eq!(results, vec!["s1"]);
    }

    #[test]
    fn test_duckduckgo_nothing_found() {
        let body = r#"{"Answer":"","Definition":"","RelatedTopics":[]}"#;
        let results = ResponseParser::DuckDuckGo.parse(&ok(body), "rust lang");
        assert_eq!(results, vec!["Search completed for 'rust lang' - no specific results found"]);
    }

    #[test]
    fn test_duckduckgo_null_topics() {
        let body = r#"{"Answer":"42","RelatedTopics":null}"#;
        let results = ResponseParser::DuckDuckGo.parse(&ok(body), "q");
        assert_eq!(results, vec!["Answer: 42"]);
    }

    #[test]
    fn test_duckduckgo_null_organic() {
        let body = r#"{"organic":null,"RelatedTopics":[{"Text":"x"}]}"#;
        let results = ResponseParser::DuckDuckGo.parse(&ok(body), "q");
        assert_eq!(results, vec!["x"]);
    }

    #[test]
    fn test_duckduckgo_structured_answer() {
        let body = r#"{"Answer":{"from":"calculator","result":"4"},"Definition":null,"RelatedTopics":[]}"#;
        let results = ResponseParser::DuckDuckGo.parse(&ok(body), "2+2");
        assert_eq!(results, vec![r#"Answer: {"from":"calculator","result":"4"}"#]);
    }

    #[test]
    fn test_non_empty_text() {
        assert_eq!(non_empty_text(&serde_json::json!(7)), Some("7".into()));
        assert_eq!(non_empty_text(&serde_json::json!(true)), Some("true".into()));
        assert_eq!(non_empty_text(&serde_json::json!(0)), None);
        assert_eq!(non_empty_text(&serde_json::json!(false)), None);
        assert_eq!(non_empty_text(&serde_json::json!({})), None);
        assert_eq!(non_empty_text(&Value::Null), None);
    }

    #[test]
    fn test_duckduckgo_invalid_json() {
        let results = ResponseParser::DuckDuckGo.parse(&ok("not json"), "q");
        assert_eq!(results.len(), 1);
        assert!(results[0].starts_with("Error parsing DuckDuckGo response: "));
    }

    #[test]
    fn test_bing_rss_titles() {
        let body = r#"<?xml version="1.0" encoding="utf-8" ?>
            <rss version="2.0">
              <channel>
                <title>Bing: rust</title>
                <item><title>Rust Programming Language</title><description>A language</description></item>
                <item><title>Rust &amp; Cargo</title><description>Build tool</description></item>
              </channel>
            </rss>"#;
        let results = ResponseParser::Bing.parse(&ok(body), "rust");
        assert_eq!(results, vec!["Rust Programming Language", "Rust & Cargo"]);
    }

    #[test]
    fn test_bing_rss_caps_at_ten() {
        let items: String = (0..12).map(|i| format!("<item><title>Item {i}</title></item>")).collect();
        let body = format!("<rss><channel>{items}</channel></rss>");
        let results = ResponseParser::Bing.parse(&ok(&body), "q");
        assert_eq!(results.len(), 10);
        assert_eq!(results[9], "Item 9");
    }

    #[test]
    fn test_bing_rss_cdata_title() {
        let body = "<rss><channel><item><title><![CDATA[X]]></title></item></channel></rss>";
        let results = ResponseParser::Bing.parse(&ok(body), "q");
        assert_eq!(results, vec!["X"]);
    }

    #[test]
    fn test_strip_cdata() {
        assert_eq!(strip_cdata("<![CDATA[ Rust news ]]>"), "Rust news");
        assert_eq!(strip_cdata("plain"), "plain");
    }

    #[test]
    fn test_bing_falls_back_to_json() {
        let results = ResponseParser::Bing.parse(&ok(r#"{"results":[{"title":"J"}]}"#), "q");
        assert_eq!(results, vec!["J"]);
    }

    #[test]
    fn test_google_html_headings() {
        let body = "<html><body><div><a><h3>First <span>hit</span></h3></a></div><h3>Second</h3></body></html>";
        let results = ResponseParser::Google.parse(&ok(body), "q");
        assert_eq!(results, vec!["First hit", "Second"]);
    }

    #[test]
    fn test_google_headings_cap_at_ten() {
        let headings: String = (0..12).map(|i| format!("<h3>Hit {i}</h3>")).collect();
        let body = format!("<html><body>{headings}</body></html>");
        let results = ResponseParser::Google.parse(&ok(&body), "q");
        assert_eq!(results.len(), 10);
        assert_eq!(results[9], "Hit 9");
    }

    #[test]
    fn test_google_plain_text_summary() {
        let results = ResponseParser::Google.parse(&ok("plain"), "q");
        assert_eq!(results, vec!["Search completed for 'q' - received 5 characters of non-JSON content"]);
    }
}
