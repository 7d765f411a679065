use crate::show::ShowRecord;
use scraper::{Html, Node};

pub const PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/250x350?text=No+Image";
pub const UNKNOWN_GENRE: &str = "Unknown";
pub const NO_DESCRIPTION: &str = "No description.";
pub const RATING_NOT_AVAILABLE: &str = "N/A";
pub const NO_RESULTS: &str = "No shows match your search.";

// Elements whose boundaries separate words once the tags are gone.
const BLOCK_ELEMENTS: [&str; 12] = [
    "p", "br", "div", "li", "ul", "ol", "h1", "h2", "h3", "h4", "blockquote", "hr",
];

/// Display-ready projection of a [`ShowRecord`].
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub id: u64,
    pub name: String,
    pub image_url: String,
    pub genre_tags: Vec<String>,
    pub summary_text: String,
    pub display_rating: String,
}

impl Card {
    pub fn from_show(show: &ShowRecord) -> Self {
        let genre_tags = if show.genres.is_empty() {
            vec![UNKNOWN_GENRE.to_string()]
        } else {
            show.genres.clone()
        };

        Self {
            id: show.id,
            name: show.name.clone(),
            image_url: show
                .medium_image()
                .unwrap_or(PLACEHOLDER_IMAGE_URL)
                .to_string(),
            genre_tags,
            summary_text: show
                .summary
                .as_deref()
                .map(strip_markup)
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            display_rating: show
                .average_rating()
                .map(format_rating)
                .unwrap_or_else(|| RATING_NOT_AVAILABLE.to_string()),
        }
    }

    /// Plain-text block used by the non-interactive `list` command.
    pub fn to_plain_text(&self) -> String {
        format!(
            "{} [#{}]\n  Genres: {}\n  Rating: {} ★\n  Image:  {}\n  {}",
            self.name,
            self.id,
            self.genre_tags.join(", "),
            self.display_rating,
            self.image_url,
            self.summary_text
        )
    }
}

/// Outcome of rendering a displayed set: cards, or the no-results message.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderedList {
    NoResults,
    Cards(Vec<Card>),
}

impl RenderedList {
    pub fn len(&self) -> usize {
        match self {
            Self::NoResults => 0,
            Self::Cards(cards) => cards.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn cards(&self) -> &[Card] {
        match self {
            Self::NoResults => &[],
            Self::Cards(cards) => cards,
        }
    }
}

/// Build the full replacement output for a displayed set.
pub fn render(displayed: &[&ShowRecord]) -> RenderedList {
    if displayed.is_empty() {
        RenderedList::NoResults
    } else {
        RenderedList::Cards(displayed.iter().map(|show| Card::from_show(show)).collect())
    }
}

pub fn format_rating(average: f64) -> String {
    format!("{average:.1}")
}

/// Strip markup from a rich-text summary.
///
/// Parses the fragment as HTML and keeps only text nodes, so entities are
/// decoded and a literal `<` that is not a tag survives. Whitespace is
/// collapsed to single spaces.
pub fn strip_markup(markup: &str) -> String {
    let fragment = Html::parse_fragment(markup);
    let mut text = String::with_capacity(markup.len());

    for node in fragment.root_element().descendants() {
        match node.value() {
            Node::Text(t) => text.push_str(t),
            Node::Element(el) if BLOCK_ELEMENTS.contains(&el.name()) => text.push(' '),
            _ => {}
        }
    }

    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
