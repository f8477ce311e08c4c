//! Static HTML gallery of the collection.

use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::Local;
use tracing::info;

use crate::core::errors::{MovieError, Result};
use crate::domain::Movie;

pub const PAGE_TITLE: &str = "My Movie Collection";
pub const TEMPLATE_FILE: &str = "movie_template.html";
pub const STYLE_FILE: &str = "style.css";
pub const INDEX_FILE: &str = "index.html";
pub const PLACEHOLDER_POSTER_URL: &str = "https://via.placeholder.com/300x450?text=No+Poster";

const TITLE_MARKER: &str = "${TITLE}";
const GRID_MARKER: &str = "${MOVIE_GRID}";
const GENERATED_MARKER: &str = "${GENERATED_AT}";

const DEFAULT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>${TITLE}</title>
    <link rel="stylesheet" href="style.css">
</head>
<body>
    <header>
        <h1>${TITLE}</h1>
    </header>
    <main>
        <ol class="movie-grid">
${MOVIE_GRID}
        </ol>
    </main>
    <footer>Generated ${GENERATED_AT}</footer>
</body>
</html>
"#;

const DEFAULT_STYLE: &str = r#"body {
    background: #f5f5f0;
    color: #222;
    font-family: "Helvetica Neue", Arial, sans-serif;
    margin: 0;
}

header {
    background: #1f2a44;
    color: #fff;
    padding: 1.5rem 2rem;
}

.movie-grid {
    display: grid;
    gap: 1.5rem;
    grid-template-columns: repeat(auto-fill, minmax(200px, 1fr));
    list-style: none;
    padding: 2rem;
}

.movie {
    background: #fff;
    border-radius: 6px;
    box-shadow: 0 1px 4px rgba(0, 0, 0, 0.15);
    padding: 0.75rem;
    text-align: center;
}

.movie-poster {
    height: 300px;
    object-fit: cover;
    width: 200px;
}

.movie-title {
    font-weight: bold;
    margin-top: 0.5rem;
}

footer {
    color: #888;
    font-size: 0.8rem;
    padding: 1rem 2rem;
}

.movie-year,
.movie-rating {
    color: #666;
    font-size: 0.9rem;
}
"#;

/// Renders the collection into `index.html` + `style.css`.
#[derive(Debug, Clone, Default)]
pub struct SiteGenerator {
    template_dir: Option<PathBuf>,
}

impl SiteGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `movie_template.html` / `style.css` from `dir` when present,
    /// falling back to the built-in versions per file.
    pub fn with_template_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.template_dir = Some(dir.into());
        self
    }

    /// Writes the gallery into `output_dir` and returns the index path.
    pub fn generate(&self, movies: &[Movie], output_dir: &Path) -> Result<PathBuf> {
        let template = self.load_or(TEMPLATE_FILE, DEFAULT_TEMPLATE)?;
        if !template.contains(GRID_MARKER) {
            return Err(MovieError::Site(format!(
                "template is missing the {GRID_MARKER} placeholder"
            )));
        }
        let style = self.load_or(STYLE_FILE, DEFAULT_STYLE)?;

        fs::create_dir_all(output_dir).map_err(site_io)?;
        let html = render_page(&template, movies);
        let index = output_dir.join(INDEX_FILE);
        fs::write(&index, html).map_err(site_io)?;
        fs::write(output_dir.join(STYLE_FILE), style).map_err(site_io)?;

        info!(
            path = %index.display(),
            movies = movies.len(),
            "generated movie gallery"
        );
        Ok(index)
    }

    fn load_or(&self, file: &str, fallback: &str) -> Result<String> {
        match &self.template_dir {
            Some(dir) if dir.join(file).is_file() => {
                fs::read_to_string(dir.join(file)).map_err(site_io)
            }
            _ => Ok(fallback.to_string()),
        }
    }
}

fn site_io(err: std::io::Error) -> MovieError {
    MovieError::Site(err.to_string())
}

pub fn render_page(template: &str, movies: &[Movie]) -> String {
    let grid: Vec<String> = movies.iter().map(render_card).collect();
    let generated = Local::now().format("%Y-%m-%d %H:%M").to_string();
    template
        .replace(TITLE_MARKER, PAGE_TITLE)
        .replace(GENERATED_MARKER, &generated)
        .replace(GRID_MARKER, &grid.join("\n"))
}

pub fn render_card(movie: &Movie) -> String {
    let poster = if movie.has_poster() {
        movie.poster.trim()
    } else {
        PLACEHOLDER_POSTER_URL
    };
    let title = escape_html(&movie.title);
    format!(
        r#"            <li>
                <div class="movie">
                    <img class="movie-poster" src="{poster}" alt="{title}"/>
                    <div class="movie-title">{title}</div>
                    <div class="movie-year">{year}</div>
                    <div class="movie-rating">⭐ {rating}/10</div>
                </div>
            </li>"#,
        poster = escape_html(poster),
        title = title,
        year = movie.year,
        rating = movie.rating,
    )
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
