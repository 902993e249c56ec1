//! Popular tours catalog

use serde::Serialize;
use tracing::debug;

/// A packaged tour from the agency's catalog
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tour {
    pub id: u32,
    pub title: &'static str,
    pub location: &'static str,
    /// Price per person in USD
    pub price: u32,
    pub duration: &'static str,
    pub rating: f32,
    pub reviews: u32,
    pub image: &'static str,
    pub category: &'static str,
}

impl Tour {
    /// Price formatted for display, e.g. "$1,899"
    pub fn price_display(&self) -> String {
        let digits = self.price.to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(',');
            }
            out.push(c);
        }
        format!("${}", out)
    }
}

pub const TOURS: [Tour; 6] = [
    Tour {
        id: 1,
        title: "Santorini Sunset Dreams",
        location: "Greece",
        price: 1899,
        duration: "7 Days",
        rating: 4.9,
        reviews: 124,
        image: "https://images.unsplash.com/photo-1613395877344-13d4c79e4284?q=80&w=2070&auto=format&fit=crop",
        category: "Romantic",
    },
    Tour {
        id: 2,
        title: "Kyoto Cultural Immersion",
        location: "Japan",
        price: 2450,
        duration: "10 Days",
        rating: 5.0,
        reviews: 89,
        image: "https://images.unsplash.com/photo-1493976040374-85c8e12f0c0e?q=80&w=2070&auto=format&fit=crop",
        category: "Culture",
    },
    Tour {
        id: 3,
        title: "Bali Tropical Paradise",
        location: "Indonesia",
        price: 1200,
        duration: "6 Days",
        rating: 4.8,
        reviews: 210,
        image: "https://images.unsplash.com/photo-1537996194471-e657df975ab4?q=80&w=2038&auto=format&fit=crop",
        category: "Relaxation",
    },
    Tour {
        id: 4,
        title: "Swiss Alps Adventure",
        location: "Switzerland",
        price: 3100,
        duration: "8 Days",
        rating: 4.9,
        reviews: 56,
        image: "https://images.unsplash.com/photo-1530122037265-a5f1f91d3b99?q=80&w=2070&auto=format&fit=crop",
        category: "Adventure",
    },
    Tour {
        id: 5,
        title: "Safari in Serengeti",
        location: "Tanzania",
        price: 4500,
        duration: "9 Days",
        rating: 5.0,
        reviews: 72,
        image: "https://images.unsplash.com/photo-1516426122078-c23e76319801?q=80&w=2068&auto=format&fit=crop",
        category: "Wildlife",
    },
    Tour {
        id: 6,
        title: "Amalfi Coast Escape",
        location: "Italy",
        price: 2800,
        duration: "7 Days",
        rating: 4.7,
        reviews: 150,
        image: "https://images.unsplash.com/photo-1516483638261-f4dbaf036963?q=80&w=2030&auto=format&fit=crop",
        category: "Luxury",
    },
];

/// All tours in catalog order
pub fn all() -> &'static [Tour] {
    &TOURS
}

pub fn by_id(id: u32) -> Option<&'static Tour> {
    debug!(id, "catalog::by_id: called");
    TOURS.iter().find(|t| t.id == id)
}

/// Tours whose category matches, ignoring case
pub fn by_category(category: &str) -> Vec<&'static Tour> {
    debug!(%category, "catalog::by_category: called");
    let category = category.trim();
    TOURS
        .iter()
        .filter(|t| t.category.eq_ignore_ascii_case(category))
        .collect()
}

/// Distinct categories in catalog order
pub fn categories() -> Vec<&'static str> {
    let mut seen = Vec::new();
    for tour in &TOURS {
        if !seen.contains(&tour.category) {
            seen.push(tour.category);
        }
    }
    seen
}
