use serde::Serialize;

/// Name returned for a genre code outside the catalog's table
pub const UNKNOWN_GENRE: &str = "Unknown";

/// One entry of the catalog's closed genre table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Genre {
    pub id: u32,
    pub name: &'static str,
}

/// Movie genres as numbered by the catalog API
pub const GENRES: &[Genre] = &[
    Genre { id: 28, name: "Action" },
    Genre { id: 12, name: "Adventure" },
    Genre { id: 16, name: "Animation" },
    Genre { id: 35, name: "Comedy" },
    Genre { id: 80, name: "Crime" },
    Genre { id: 99, name: "Documentary" },
    Genre { id: 18, name: "Drama" },
    Genre { id: 10751, name: "Family" },
    Genre { id: 14, name: "Fantasy" },
    Genre { id: 36, name: "History" },
    Genre { id: 27, name: "Horror" },
    Genre { id: 10402, name: "Music" },
    Genre { id: 9648, name: "Mystery" },
    Genre { id: 10749, name: "Romance" },
    Genre { id: 878, name: "Science Fiction" },
    Genre { id: 10770, name: "TV Movie" },
    Genre { id: 53, name: "Thriller" },
    Genre { id: 10752, name: "War" },
    Genre { id: 37, name: "Western" },
];

/// Resolves a genre name (case-insensitive, surrounding whitespace ignored)
pub fn name_to_id(name: &str) -> Option<u32> {
    let name = name.trim();
    GENRES
        .iter()
        .find(|genre| genre.name.eq_ignore_ascii_case(name))
        .map(|genre| genre.id)
}

/// Resolves a genre code, falling back to [`UNKNOWN_GENRE`]
pub fn id_to_name(id: u32) -> &'static str {
    GENRES
        .iter()
        .find(|genre| genre.id == id)
        .map(|genre| genre.name)
        .unwrap_or(UNKNOWN_GENRE)
}

pub fn is_known_id(id: u32) -> bool {
    GENRES.iter().any(|genre| genre.id == id)
}
