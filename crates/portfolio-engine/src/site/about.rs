//! Header card at the top of the page.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct About {
    pub name: String,
    pub avatar_url: String,
    /// Short description under the name.
    pub blurb: String,
    /// Target of the "GitHub" button.
    pub profile_url: String,
}

impl Default for About {
    fn default() -> Self {
        Self {
            name: "Wagner Guilherme".to_string(),
            avatar_url: "https://picsum.photos/200/200".to_string(),
            blurb: "Desenvolvedor FullStack e entusiasta de Inteligência Artificial. \
                    Explorando novas tecnologias e criando soluções inovadoras."
                .to_string(),
            profile_url: "https://github.com/wagner840".to_string(),
        }
    }
}

impl About {
    /// Avatar fallback: first letter of the first and last name, uppercased.
    pub fn initials(&self) -> String {
        let mut words = self.name.split_whitespace();
        let first = words.next();
        let last = words.last();
        first
            .into_iter()
            .chain(last)
            .filter_map(|w| w.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> About {
        About {
            name: name.to_string(),
            ..About::default()
        }
    }

    #[test]
    fn default_initials() {
        assert_eq!(About::default().initials(), "WG");
    }

    #[test]
    fn initials_use_first_and_last_word() {
        assert_eq!(named("ada king lovelace").initials(), "AL");
        assert_eq!(named("  Linus  ").initials(), "L");
        assert_eq!(named("").initials(), "");
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let about: About = serde_json::from_str(r#"{ "name": "Octo Cat" }"#).unwrap();
        assert_eq!(about.name, "Octo Cat");
        assert_eq!(about.profile_url, "https://github.com/wagner840");
    }
}
