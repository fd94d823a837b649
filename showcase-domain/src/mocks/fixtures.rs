use url::Url;

use crate::domain::models::{
    AvatarOutput, Bio, BioOutput, Image, RenderedSocialLink, RichText, SocialLink,
};

fn dummy_url() -> Url {
    Url::parse("http://dummy.net").expect("static url is valid")
}

pub fn image(tag: &str) -> Image {
    Image::new(tag.as_bytes().to_vec(), "image/png")
}

pub fn avatar_output() -> AvatarOutput {
    AvatarOutput::new(image("heart.fill"), vec![image("heart.fill"), image("heart.fill")])
}

pub fn bio_output() -> BioOutput {
    BioOutput {
        bio: RichText::new("mocked bio"),
        links: (1..=3)
            .map(|i| RenderedSocialLink {
                title: RichText::new(format!("mocked link {i}")),
                url: dummy_url(),
            })
            .collect(),
    }
}

/// A small biography with two paragraphs and two links.
pub fn bio() -> Bio {
    Bio {
        name: "N".to_string(),
        role: "R".to_string(),
        location: "L".to_string(),
        bios: vec!["a".to_string(), "b".to_string()],
        links: vec![
            SocialLink::new(
                "GitHub",
                Url::parse("https://github.com/example").expect("static url is valid"),
            ),
            SocialLink::new(
                "LinkedIn",
                Url::parse("https://linkedin.com/in/example").expect("static url is valid"),
            ),
        ],
    }
}
