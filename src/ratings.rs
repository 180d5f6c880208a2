//! Star ratings

/// Maximum number of stars shown for a rating.
pub const MAX_STARS: u8 = 5;

/// A rating broken down into full, half and empty stars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarRating {
    /// Filled stars
    pub full: u8,

    /// Whether a half star follows the filled stars
    pub half: bool,

    /// Empty stars padding the row to [`MAX_STARS`]
    pub empty: u8,
}

impl StarRating {
    /// Break a 0-5 rating into stars. Fractions of 0.5 or more show a half star.
    pub fn from_rating(rating: f32) -> Self {
        let rating = if rating.is_finite() {
            rating.clamp(0.0, f32::from(MAX_STARS))
        } else {
            0.0
        };

        let mut full = 0;

        while full < MAX_STARS && f32::from(full + 1) <= rating {
            full += 1;
        }

        let half = full < MAX_STARS && rating - f32::from(full) >= 0.5;
        let empty = MAX_STARS - full - u8::from(half);

        Self { full, half, empty }
    }

    /// Render as text, e.g. `★★★★½`.
    pub fn to_text(self) -> String {
        let mut stars = "★".repeat(usize::from(self.full));

        if self.half {
            stars.push('½');
        }

        stars.push_str(&"☆".repeat(usize::from(self.empty)));

        stars
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_rating_has_no_half_star() {
        assert_eq!(
            StarRating::from_rating(4.0),
            StarRating {
                full: 4,
                half: false,
                empty: 1
            }
        );
    }

    #[test]
    fn half_star_from_point_five() {
        assert_eq!(
            StarRating::from_rating(4.5),
            StarRating {
                full: 4,
                half: true,
                empty: 0
            }
        );
        assert!(!StarRating::from_rating(4.3).half);
    }

    #[test]
    fn clamps_out_of_range_ratings() {
        assert_eq!(StarRating::from_rating(7.0).full, 5);
        assert_eq!(StarRating::from_rating(-1.0).empty, 5);
        assert_eq!(StarRating::from_rating(f32::NAN).empty, 5);
    }

    #[test]
    fn to_text_always_has_five_symbols() {
        assert_eq!(StarRating::from_rating(3.5).to_text(), "★★★½☆");
        assert_eq!(StarRating::from_rating(0.0).to_text(), "☆☆☆☆☆");
    }
}
