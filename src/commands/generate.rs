//! Generate the search index and post manifest

use anyhow::Result;

use crate::content::loader::ContentLoader;
use crate::generator::Generator;
use crate::Blog;

/// Load every post and write the generated artifacts
pub fn run(blog: &Blog) -> Result<()> {
    let start = std::time::Instant::now();

    let posts = ContentLoader::new(blog).load_posts()?;
    tracing::info!("Loaded {} posts", posts.len());

    Generator::new(blog).generate(&posts)?;

    let duration = start.elapsed();
    tracing::info!("Generated in {:.2}s", duration.as_secs_f64());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_generate_from_contents() {
        let dir = TempDir::new().unwrap();
        let contents = dir.path().join("contents");
        fs::create_dir_all(&contents).unwrap();
        fs::write(
            contents.join("hello.md"),
            "---\ntitle: Hello\ndate: 2021.03.04\ncategories: [web]\n---\nBody\n",
        )
        .unwrap();

        let blog = Blog::with_config(dir.path(), SiteConfig::default());
        run(&blog).unwrap();

        let index = fs::read_to_string(dir.path().join("public/search.json")).unwrap();
        assert!(index.contains("\"slug\": \"/hello/\""));
        assert!(dir.path().join("public/posts.json").exists());
    }

    #[test]
    fn test_generate_empty_contents() {
        let dir = TempDir::new().unwrap();
        let blog = Blog::with_config(dir.path(), SiteConfig::default());
        run(&blog).unwrap();
        let index = fs::read_to_string(dir.path().join("public/search.json")).unwrap();
        assert_eq!(index.trim(), "[]");
    }
}
