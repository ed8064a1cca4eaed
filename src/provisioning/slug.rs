//! URL-safe tenant slugs.

use crate::config::ProvisioningConfig;
use rand::distr::Alphanumeric;
use rand::Rng;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Used when a name has no usable characters at all.
pub const FALLBACK_SLUG: &str = "tenant";

/// Lower-case, accent-free, hyphen-separated and at most `max_len` long.
///
/// ```
/// use tenant_forge::provisioning::slug::slugify;
///
/// assert_eq!(slugify("Clínica Dental Sonrisa", 48), "clinica-dental-sonrisa");
/// assert_eq!(slugify("¡¡!!", 48), "tenant");
/// ```
pub fn slugify(name: &str, max_len: usize) -> String {
    let folded: String = name
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();

    let slug = folded
        .split('-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");

    let capped = cap(&slug, max_len);
    if capped.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        capped
    }
}

fn cap(slug: &str, max_len: usize) -> String {
    slug.chars()
        .take(max_len)
        .collect::<String>()
        .trim_end_matches('-')
        .to_string()
}

/// `base` shortened to make room for `-suffix` within `max_len`.
pub fn with_suffix(base: &str, suffix: &str, max_len: usize) -> String {
    let room = max_len.saturating_sub(suffix.len() + 1);
    if room == 0 {
        return cap(suffix, max_len);
    }
    let stem = match cap(base, room) {
        stem if stem.is_empty() => cap(FALLBACK_SLUG, room),
        stem => stem,
    };
    format!("{stem}-{suffix}")
}

fn random_suffix(len: usize) -> String {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| char::from(rng.sample(Alphanumeric)).to_ascii_lowercase())
        .collect()
}

/// Produces the bounded sequence of slug candidates for one name.
#[derive(Debug, Clone)]
pub struct SlugGenerator {
    max_len: usize,
    suffix_len: usize,
    max_attempts: usize,
}

impl SlugGenerator {
    pub fn new(max_len: usize, suffix_len: usize, max_attempts: usize) -> Self {
        Self {
            max_len,
            suffix_len,
            max_attempts,
        }
    }

    pub fn from_config(config: &ProvisioningConfig) -> Self {
        Self::new(
            config.slug_max_length,
            config.slug_suffix_length,
            config.max_slug_attempts,
        )
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// The plain slug first, then randomly suffixed variants.
    pub fn candidates(&self, name: &str) -> impl Iterator<Item = String> + '_ {
        let base = slugify(name, self.max_len);
        (0..self.max_attempts).map(move |attempt| {
            if attempt == 0 {
                base.clone()
            } else {
                with_suffix(&base, &random_suffix(self.suffix_len), self.max_len)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_accents_and_symbols() {
        assert_eq!(slugify("Clínica Dental Sonrisa", 48), "clinica-dental-sonrisa");
        assert_eq!(slugify("  Taquería  El Ñandú & Co. ", 48), "taqueria-el-nandu-co");
        assert_eq!(slugify("***", 48), FALLBACK_SLUG);
        assert_eq!(slugify("", 48), FALLBACK_SLUG);
    }

    #[test]
    fn test_caps_length_without_trailing_hyphen() {
        let slug = slugify("Restaurante La Casa de Toño", 16);
        assert_eq!(slug, "restaurante-la-c");
        assert_eq!(slugify("abcdefghij klm", 11), "abcdefghij");
    }

    #[test]
    fn test_suffix_fits_the_cap() {
        assert_eq!(with_suffix("clinica-dental-sonrisa", "x7k2", 48), "clinica-dental-sonrisa-x7k2");
        let tight = with_suffix("clinica-dental-sonrisa", "x7k2", 12);
        assert_eq!(tight, "clinica-x7k2");
        assert!(tight.len() <= 12);
    }

    #[test]
    fn test_suffix_never_exceeds_a_tiny_cap() {
        assert_eq!(with_suffix("clinica", "x7k2", 5), "x7k2");
        assert_eq!(with_suffix("clinica", "x7k2", 3), "x7k");
        assert_eq!(with_suffix("", "x7k2", 8), "ten-x7k2");
        for max_len in 1..=12 {
            assert!(with_suffix("clinica-dental", "x7k2", max_len).len() <= max_len);
        }
    }

    #[test]
    fn test_candidates_are_bounded() {
        let generator = SlugGenerator::new(48, 4, 3);
        let candidates: Vec<String> = generator.candidates("Clínica Dental Sonrisa").collect();

        assert_eq!(candidates.len(), 3);
        assert_eq!(candidates[0], "clinica-dental-sonrisa");
        for suffixed in &candidates[1..] {
            let suffix = suffixed.strip_prefix("clinica-dental-sonrisa-").unwrap();
            assert_eq!(suffix.len(), 4);
            assert!(suffix.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
        }
    }
}
