//! Generate static files

use anyhow::Result;
use notify::Watcher;
use std::path::Path;
use std::sync::mpsc::channel;
use std::time::Duration;

use crate::generator::Generator;
use crate::store::{MarkdownRenderer, PostStore};
use crate::Blog;

/// Generate the static site. Always a full rebuild: the store is
/// derived state, recomputed from the markdown sources every time.
pub fn run(blog: &Blog) -> Result<()> {
    let start = std::time::Instant::now();

    let renderer = MarkdownRenderer::new();
    let store = PostStore::load(&blog.posts_dir, &renderer, blog.config.future)?;
    tracing::info!("Loaded {} posts", store.len());

    let generator = Generator::new(blog)?;
    generator.generate(&store)?;

    let duration = start.elapsed();
    tracing::info!("Generated in {:.2}s", duration.as_secs_f64());

    Ok(())
}

/// Watch for file changes and regenerate
pub async fn watch(blog: &Blog) -> Result<()> {
    let (tx, rx) = channel();

    let mut watcher = notify::recommended_watcher(move |res| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })?;

    // Watch posts and static directories
    watcher.watch(blog.posts_dir.as_ref(), notify::RecursiveMode::Recursive)?;
    if blog.static_dir.exists() {
        watcher.watch(blog.static_dir.as_ref(), notify::RecursiveMode::Recursive)?;
    }

    // Watch config file
    let config_path = blog.base_dir.join("_config.yml");
    if config_path.exists() {
        watcher.watch(Path::new(&config_path), notify::RecursiveMode::NonRecursive)?;
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    // Debounce events
    let mut last_rebuild = std::time::Instant::now();

    loop {
        match rx.recv_timeout(Duration::from_millis(100)) {
            Ok(_event) => {
                if last_rebuild.elapsed() > Duration::from_millis(500) {
                    tracing::info!("File changed, regenerating...");
                    if let Err(e) = run(blog) {
                        tracing::error!("Generation failed: {}", e);
                    }
                    last_rebuild = std::time::Instant::now();
                }
            }
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {
                // Continue waiting
            }
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => {
                break;
            }
        }
    }

    Ok(())
}
