use std::fmt;

/// The demo's display object: a title plus an image reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub title: String,
    pub image: String,
}

impl Post {
    pub fn new(title: &str, image: &str) -> Self {
        Self {
            title: title.to_string(),
            image: image.to_string(),
        }
    }
}

/// Stringification contract: the title followed by an image tag referencing
/// the configured asset.
impl fmt::Display for Post {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\n<img src=\"{}\" alt=\"{}\" />",
            self.title, self.image, self.title
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_contains_title_and_image() {
        let post = Post::new("Webpack Post Title", "assets/images/icon.svg");
        let s = post.to_string();
        assert!(s.contains("Webpack Post Title"));
        assert!(s.contains("<img src=\"assets/images/icon.svg\""));
    }

    #[test]
    fn test_display_holds_for_any_nonempty_input() {
        for (title, image) in [("a", "b.png"), ("Spaced Title", "deep/path/logo.webp")] {
            let s = Post::new(title, image).to_string();
            assert!(s.contains(title));
            assert!(s.contains(image));
        }
    }
}
