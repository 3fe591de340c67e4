// SPDX-FileCopyrightText: 2026 Veranda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The static hotel catalog.
//!
//! Read-only input to the prompt builder and fallback responder; nothing in
//! the conversation logic ever mutates an entry.

use veranda_core::types::Hotel;

/// Returns the default luxury catalog.
pub fn default_catalog() -> Vec<Hotel> {
    vec![
        Hotel {
            id: 1,
            name: "The Ritz-Carlton, Melbourne".to_string(),
            price: 1_240_000,
            location: "Mabbin, Australia".to_string(),
            rating: 5.0,
        },
        Hotel {
            id: 2,
            name: "The Langham, Gold Coast".to_string(),
            price: 1_240_000,
            location: "Mabbin, Australia".to_string(),
            rating: 5.0,
        },
        Hotel {
            id: 3,
            name: "Longitude 131°, Uluru".to_string(),
            price: 1_240_000,
            location: "Mabbin, Australia".to_string(),
            rating: 5.0,
        },
        Hotel {
            id: 4,
            name: "Qualia Resort, Hamilton Island".to_string(),
            price: 1_450_000,
            location: "Whitsundays, Australia".to_string(),
            rating: 5.0,
        },
        Hotel {
            id: 5,
            name: "The Peninsula, Sydney".to_string(),
            price: 1_680_000,
            location: "Sydney, Australia".to_string(),
            rating: 5.0,
        },
    ]
}

/// Renders one catalog entry as a single descriptive line.
pub fn render_line(hotel: &Hotel) -> String {
    format!(
        "🏨 {} - {} DH/night\n⭐ Rating: {:.1} | 📍 {}",
        hotel.name,
        format_price(hotel.price),
        hotel.rating,
        hotel.location
    )
}

/// Formats a nightly price with thousands separators ("1 240 000").
pub fn format_price(price: u64) -> String {
    let digits = price.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i != 0 && (digits.len() - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(c);
    }
    out
}
