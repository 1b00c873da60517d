//! Candidate View
//!
//! Renders the candidate detail page: official information, news articles
//! and the social media widget.

use crate::api::{CandidateDetail, CandidateResponse, NewsArticle};
use crate::config::RenderConfig;
use crate::render::container::{ids, PageShell};
use crate::render::dates::iso_date;
use crate::render::error::RenderResult;
use crate::render::node::{Element, Node};

pub const NO_ARTICLES_MESSAGE: &str = "No news articles were found for this candidate.";

const TWITTER_PROFILE_BASE: &str = "https://twitter.com/";

/// Everything the candidate page displays for one response
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateView {
    pub detail: CandidateDetail,
    pub articles: Vec<NewsArticle>,
    pub election_name: Option<String>,
    pub twitter_handle: Option<String>,
}

impl CandidateView {
    pub fn new(response: CandidateResponse, election_name: Option<String>) -> Self {
        let twitter_handle = response
            .candidate_data
            .twitter_handle()
            .map(str::to_string)
            .or_else(|| handle_from_social_media(response.social_media_data.as_ref()));

        Self {
            detail: response.candidate_data,
            articles: response.news_articles_data,
            election_name,
            twitter_handle,
        }
    }

    /// Write the view into the candidate shell, replacing what was there
    pub fn apply(&self, shell: &mut PageShell, config: &RenderConfig) -> RenderResult<()> {
        shell
            .container_mut(ids::OFFICIAL_INFO)?
            .replace_children(render_official_info(&self.detail, self.election_name.as_deref()));

        shell
            .container_mut(ids::NEWS_ARTICLES)?
            .replace_children(render_news_articles(&self.articles, config.excerpt_words));

        shell
            .container_mut(ids::SOCIAL_MEDIA)?
            .replace_children(render_social_media(self.twitter_handle.as_deref(), config));

        shell.container_mut(ids::ALERT)?.clear();
        Ok(())
    }
}

/// Name, affiliation, incumbency, and whatever contact details are known
pub fn render_official_info(detail: &CandidateDetail, election_name: Option<&str>) -> Vec<Node> {
    let summary = &detail.summary;
    let mut nodes: Vec<Node> = Vec::new();

    if let Some(photo) = non_blank(detail.photo_url.as_deref()) {
        nodes.push(
            Element::new("img")
                .class("candidate-photo")
                .attr("src", photo)
                .attr("alt", summary.name.as_str())
                .into(),
        );
    }

    nodes.push(Element::new("h2").text(summary.name.as_str()).into());

    let mut facts = Element::new("dl").class("official-info");
    if let Some(position) = non_blank(detail.position.as_deref()) {
        facts = fact(facts, "Running For", Node::text(position));
    }
    if let Some(election) = non_blank(election_name) {
        facts = fact(facts, "Election", Node::text(election));
    }
    facts = fact(facts, "Party Affiliation", Node::text(summary.party_affiliation.as_str()));
    facts = fact(
        facts,
        "Incumbent",
        Node::text(if summary.incumbency { "Yes" } else { "No" }),
    );
    if let Some(email) = non_blank(detail.email.as_deref()) {
        let link = Element::new("a").attr("href", format!("mailto:{}", email)).text(email);
        facts = fact(facts, "Email", link.into());
    }
    if let Some(phone) = non_blank(detail.phone.as_deref()) {
        let link = Element::new("a").attr("href", format!("tel:{}", phone)).text(phone);
        facts = fact(facts, "Phone", link.into());
    }
    if let Some(website) = non_blank(detail.website.as_deref()) {
        facts = fact(facts, "Website", external_link(website, website).into());
    }

    nodes.push(facts.into());
    nodes
}

fn fact(list: Element, label: &str, value: Node) -> Element {
    list.child(Element::new("dt").text(label))
        .child(Element::new("dd").child(value))
}

/// One list item per article, in response order
pub fn render_news_articles(articles: &[NewsArticle], excerpt_words: usize) -> Vec<Node> {
    if articles.is_empty() {
        return vec![Element::new("p")
            .class("no-articles")
            .text(NO_ARTICLES_MESSAGE)
            .into()];
    }

    let items = articles
        .iter()
        .map(|article| render_news_article(article, excerpt_words));

    vec![Element::new("ul").class("news-articles").children(items).into()]
}

fn render_news_article(article: &NewsArticle, excerpt_words: usize) -> Element {
    let title = if article.title.trim().is_empty() {
        article.url.as_str()
    } else {
        article.title.as_str()
    };

    let mut meta = Element::new("p")
        .class("article-meta")
        .child(Element::new("span").class("publisher").text(article.publisher.as_str()));
    if let Some(date) = non_blank(article.published_date.as_deref()) {
        let mut time = Element::new("time").text(date);
        if let Some(iso) = iso_date(date) {
            time = time.attr("datetime", iso);
        }
        meta = meta.text(" ").child(time);
    }

    let excerpt = Element::new("p")
        .class("article-excerpt")
        .text(format!("{} ", excerpt(article, excerpt_words)))
        .child(external_link(&article.url, "Read more"));

    Element::new("li")
        .class("news-article")
        .child(Element::new("h4").child(external_link(&article.url, title)))
        .child(meta)
        .child(excerpt)
}

/// Article excerpt: the backend's abbreviation when present, otherwise
/// the first `max_words` words of the content. `…` marks a cut.
pub fn excerpt(article: &NewsArticle, max_words: usize) -> String {
    if let Some(abbreviated) = non_blank(article.abbreviated_content.as_deref()) {
        let abbreviated = abbreviated.trim();
        return if abbreviated == article.content.trim() || article.content.trim().is_empty() {
            abbreviated.to_string()
        } else {
            format!("{}…", abbreviated)
        };
    }

    let words: Vec<&str> = article.content.split_whitespace().collect();
    if words.len() <= max_words {
        words.join(" ")
    } else {
        format!("{}…", words[..max_words].join(" "))
    }
}

/// Twitter timeline anchor plus the widget script. Empty without a handle.
pub fn render_social_media(handle: Option<&str>, config: &RenderConfig) -> Vec<Node> {
    let Some(handle) = handle else {
        return Vec::new();
    };

    vec![
        Element::new("a")
            .class("twitter-timeline")
            .attr("data-height", "600")
            .attr("href", twitter_timeline_url(handle))
            .text(format!("Tweets by {}", handle))
            .into(),
        Element::new("script")
            .attr("async", "")
            .attr("src", config.twitter_widget_script.as_str())
            .attr("charset", "utf-8")
            .into(),
    ]
}

pub fn twitter_timeline_url(handle: &str) -> String {
    format!(
        "{}{}?ref_src=twsrc%5Etfw",
        TWITTER_PROFILE_BASE,
        urlencoding::encode(handle)
    )
}

fn handle_from_social_media(data: Option<&serde_json::Value>) -> Option<String> {
    data?
        .get("twitter")?
        .as_str()
        .map(|h| h.trim().trim_start_matches('@'))
        .filter(|h| !h.is_empty())
        .map(str::to_string)
}

fn external_link(href: &str, text: &str) -> Element {
    Element::new("a")
        .attr("href", href)
        .attr("target", "_blank")
        .attr("rel", "noopener noreferrer")
        .text(text)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(body: serde_json::Value) -> CandidateResponse {
        serde_json::from_value(body).unwrap()
    }

    fn sample() -> CandidateResponse {
        response(json!({
            "candidateData": {
                "id": "5",
                "name": "C. Lee",
                "partyAffiliation": "Rep.",
                "isIncumbent": true,
                "position": "Governor",
                "email": "lee@example.org",
                "photoURL": "https://img.example/lee.png",
                "twitter": "clee"
            },
            "newsArticlesData": [
                {
                    "title": "Lee announces plan",
                    "url": "https://news.example/plan",
                    "publisher": "Daily Planet",
                    "publishedDate": "Jul 30, 2020, 12:00:00 AM",
                    "content": "one two three four five"
                },
                {
                    "title": "Second story",
                    "url": "https://news.example/second",
                    "publisher": "Gazette",
                    "content": "full text here",
                    "abbreviatedContent": "full text"
                }
            ]
        }))
    }

    #[test]
    fn test_apply_fills_all_containers() {
        let config = RenderConfig::default();
        let mut shell = PageShell::candidate();
        shell.container_mut(ids::ALERT).unwrap().set_text("stale");

        CandidateView::new(sample(), Some("General".into()))
            .apply(&mut shell, &config)
            .unwrap();

        let info = shell.container(ids::OFFICIAL_INFO).unwrap();
        let info_text = info.text_content();
        assert!(info_text.contains("C. Lee"));
        assert!(info_text.contains("Governor"));
        assert!(info_text.contains("General"));
        assert!(info.inner_html().contains("mailto:lee@example.org"));
        assert!(info.inner_html().contains(r#"src="https://img.example/lee.png""#));

        let news = shell.container(ids::NEWS_ARTICLES).unwrap();
        let list = news.child_elements().next().unwrap();
        assert_eq!(list.find_all("li").len(), 2);

        let social = shell.container(ids::SOCIAL_MEDIA).unwrap();
        assert!(social
            .inner_html()
            .contains("https://twitter.com/clee?ref_src=twsrc%5Etfw"));
        assert!(social.inner_html().contains(&config.twitter_widget_script));

        assert!(shell.container(ids::ALERT).unwrap().is_empty());
    }

    #[test]
    fn test_article_rendering() {
        let articles = sample().news_articles_data;
        let nodes = render_news_articles(&articles, 3);
        let list = nodes[0].as_element().unwrap();
        let first = list.find_all("li")[0];

        let links = first.find_all("a");
        assert_eq!(links[0].text_content(), "Lee announces plan");
        assert_eq!(links[0].get_attr("href"), Some("https://news.example/plan"));
        assert_eq!(links[1].text_content(), "Read more");
        assert_eq!(links[1].get_attr("href"), Some("https://news.example/plan"));

        assert_eq!(first.find_all("span")[0].text_content(), "Daily Planet");
        assert_eq!(first.find_all("time")[0].get_attr("datetime"), Some("2020-07-30"));
        assert!(first.text_content().contains("one two three…"));
    }

    #[test]
    fn test_excerpt() {
        let article = NewsArticle {
            content: "a b c".to_string(),
            ..Default::default()
        };
        assert_eq!(excerpt(&article, 3), "a b c");
        assert_eq!(excerpt(&article, 2), "a b…");

        let abbreviated = NewsArticle {
            content: "full text here".to_string(),
            abbreviated_content: Some("full text".to_string()),
            ..Default::default()
        };
        assert_eq!(excerpt(&abbreviated, 1), "full text…");
    }

    #[test]
    fn test_no_articles() {
        let nodes = render_news_articles(&[], 100);
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].text_content(), NO_ARTICLES_MESSAGE);
    }

    #[test]
    fn test_missing_twitter_leaves_social_media_empty() {
        let config = RenderConfig::default();
        let mut shell = PageShell::candidate();
        shell
            .container_mut(ids::SOCIAL_MEDIA)
            .unwrap()
            .replace_children(vec![Node::text("old widget")]);

        let without_twitter = response(json!({
            "candidateData": {"id": 9, "name": "D. Kim", "partyAffiliation": "Grn.", "incumbency": "No"},
            "newsArticlesData": []
        }));
        CandidateView::new(without_twitter, None)
            .apply(&mut shell, &config)
            .unwrap();

        assert!(shell.container(ids::SOCIAL_MEDIA).unwrap().is_empty());
    }

    #[test]
    fn test_handle_from_social_media_data() {
        let body = response(json!({
            "candidateData": {"id": 9, "name": "D. Kim"},
            "socialMediaData": {"twitter": "@dkim"}
        }));
        let view = CandidateView::new(body, None);
        assert_eq!(view.twitter_handle.as_deref(), Some("dkim"));
    }

    #[test]
    fn test_official_info_skips_absent_fields() {
        let detail = CandidateDetail::default();
        let nodes = render_official_info(&detail, None);
        let html: String = nodes.iter().map(Node::to_html).collect();

        assert!(!html.contains("<img"));
        assert!(!html.contains("Email"));
        assert!(html.contains("Party Affiliation"));
    }
}
