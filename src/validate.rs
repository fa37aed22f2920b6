use std::fmt;
use std::time::Duration;

use roxmltree::{Document, Node};

/// Cap on the whole validation fetch; a dead feed must fail within this
/// bound rather than hang the sweep.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Placeholder used when a recognized feed carries no usable title.
pub const UNTITLED: &str = "untitled";

const ATOM_NS: &str = "http://www.w3.org/2005/Atom";
const RSS1_NS: &str = "http://purl.org/rss/1.0/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedFormat {
    Atom,
    Rdf,
    Rss2,
}

impl fmt::Display for FeedFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedFormat::Atom => write!(f, "Atom"),
            FeedFormat::Rdf => write!(f, "RDF (RSS 1.0)"),
            FeedFormat::Rss2 => write!(f, "RSS 2.0"),
        }
    }
}

/// Outcome of validating a single feed URL. Produced fresh per call and
/// only ever reported, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    pub url: String,
    pub valid: bool,
    pub format: Option<FeedFormat>,
    pub title: Option<String>,
    pub item_count: usize,
    pub error: Option<String>,
}

impl Validation {
    fn failure(url: &str, error: String) -> Self {
        Self {
            url: url.to_string(),
            valid: false,
            format: None,
            title: None,
            item_count: 0,
            error: Some(error),
        }
    }
}

/// Fetches `url` and classifies the body as a feed document. Every failure
/// mode (transport, status, parse, unrecognized root) comes back as an
/// invalid [`Validation`]; this function never returns an error itself.
pub fn validate_feed(client: &reqwest::blocking::Client, url: &str) -> Validation {
    match fetch_body(client, url) {
        Ok(body) => classify(url, &body),
        Err(error) => Validation::failure(url, error),
    }
}

fn fetch_body(client: &reqwest::blocking::Client, url: &str) -> Result<String, String> {
    let response = client.get(url).send().map_err(|e| {
        if e.is_timeout() {
            format!("Timeout after {}s", FETCH_TIMEOUT.as_secs())
        } else {
            format!("Request error: {e}")
        }
    })?;
    let status = response.status();
    if !status.is_success() {
        return Err(format!("HTTP {}", status.as_u16()));
    }
    response.text().map_err(|e| format!("Request error: {e}"))
}

/// Best-effort classification by root element name. This deliberately
/// tolerates malformed or partial feeds; only an unparseable document or an
/// unrecognizable root makes the result invalid.
fn classify(url: &str, body: &str) -> Validation {
    let doc = match Document::parse(body) {
        Ok(doc) => doc,
        Err(e) => return Validation::failure(url, format!("XML parse error: {e}")),
    };
    let root = doc.root_element();
    let root_name = root.tag_name().name().to_ascii_lowercase();

    let format = if root_name.contains("feed") {
        FeedFormat::Atom
    } else if root_name.contains("rdf") {
        FeedFormat::Rdf
    } else if root_name.contains("rss") || channel_of(root).is_some() {
        FeedFormat::Rss2
    } else {
        return Validation::failure(
            url,
            format!("unknown feed format (root element <{}>)", root.tag_name().name()),
        );
    };

    let (title, item_count) = match format {
        FeedFormat::Atom => (
            lookup(root, ATOM_NS, "title").and_then(element_text),
            count_children(root, ATOM_NS, "entry"),
        ),
        FeedFormat::Rdf => (
            lookup(root, RSS1_NS, "channel")
                .and_then(|channel| lookup(channel, RSS1_NS, "title"))
                .and_then(element_text),
            count_children(root, RSS1_NS, "item"),
        ),
        FeedFormat::Rss2 => {
            let channel = channel_of(root);
            (
                channel
                    .and_then(|channel| named_child(channel, "title"))
                    .and_then(element_text),
                channel.map_or(0, |channel| {
                    channel
                        .children()
                        .filter(|n| n.is_element() && n.tag_name().name() == "item")
                        .count()
                }),
            )
        }
    };

    Validation {
        url: url.to_string(),
        valid: true,
        format: Some(format),
        title: Some(title.unwrap_or_else(|| UNTITLED.to_string())),
        item_count,
        error: None,
    }
}

/// First `name` child in `ns`; if no such element exists, retries without a
/// namespace. The retry must key on element absence, not on empty text: an
/// empty namespaced element still wins over an unqualified one.
fn lookup<'a, 'i>(parent: Node<'a, 'i>, ns: &str, name: &str) -> Option<Node<'a, 'i>> {
    match namespaced_child(parent, ns, name) {
        Some(node) => Some(node),
        None => unqualified_child(parent, name),
    }
}

fn count_children(parent: Node<'_, '_>, ns: &str, name: &str) -> usize {
    let namespaced = parent
        .children()
        .filter(|n| {
            n.is_element() && n.tag_name().name() == name && n.tag_name().namespace() == Some(ns)
        })
        .count();
    if namespaced > 0 {
        return namespaced;
    }
    parent
        .children()
        .filter(|n| {
            n.is_element() && n.tag_name().name() == name && n.tag_name().namespace().is_none()
        })
        .count()
}

fn namespaced_child<'a, 'i>(parent: Node<'a, 'i>, ns: &str, name: &str) -> Option<Node<'a, 'i>> {
    parent.children().find(|n| {
        n.is_element() && n.tag_name().name() == name && n.tag_name().namespace() == Some(ns)
    })
}

fn unqualified_child<'a, 'i>(parent: Node<'a, 'i>, name: &str) -> Option<Node<'a, 'i>> {
    parent.children().find(|n| {
        n.is_element() && n.tag_name().name() == name && n.tag_name().namespace().is_none()
    })
}

fn named_child<'a, 'i>(parent: Node<'a, 'i>, name: &str) -> Option<Node<'a, 'i>> {
    parent
        .children()
        .find(|n| n.is_element() && n.tag_name().name() == name)
}

fn channel_of<'a, 'i>(root: Node<'a, 'i>) -> Option<Node<'a, 'i>> {
    root.descendants()
        .find(|n| n.is_element() && n.tag_name().name() == "channel")
}

fn element_text(node: Node<'_, '_>) -> Option<String> {
    node.text()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}
