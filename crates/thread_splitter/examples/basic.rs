use thread_splitter::{Attachment, AttachmentKind, Platform, ThreadSplitter};

fn main() {
    println!("=== Thread Splitting Examples ===\n");

    let announcement = r#"
# We just shipped v2.0 🎉

After eight months of work, the new release is finally out. It brings a rewritten storage engine, a faster query planner and a much friendlier CLI. Upgrading is a single command for most users!

Highlights:
- Writes are up to 3x faster on spinning disks.
- Query plans are cached across restarts.
- The CLI explains every error it prints.

```bash
cargo install ourtool --version 2.0.0
```

> "This is the release we wished we had two years ago." said one of our earliest users.

Thanks to the 41 contributors who made this happen, and to everyone on #ourtool who tested the betas. Full changelog: https://example.com/releases/v2.0.0/changelog-with-a-very-long-url
"#;

    let attachments = vec![Attachment::new("release-banner.png", AttachmentKind::Image)];

    for platform in [Platform::X, Platform::Mastodon, Platform::LinkedIn] {
        let splitter = ThreadSplitter::new(platform);
        let thread = match splitter.split(announcement, &attachments, &[]) {
            Ok(thread) => thread,
            Err(e) => {
                eprintln!("Failed to split for {}: {}", platform, e);
                continue;
            }
        };

        let profile = platform.profile();
        println!("--- {} ({} chars, {:?}) ---", profile.name, profile.max_chars, thread.strategy);
        for (i, post) in thread.posts.iter().enumerate() {
            println!("[{}] {}\n", i + 1, post);
        }
    }

    println!("--- Inline markers ---");
    let marked = "1/ Caching is hard. 2/ Invalidation is harder. 3/ Naming things is hardest.";
    let thread = ThreadSplitter::new(Platform::Threads)
        .split(marked, &[], &[])
        .unwrap_or_else(|e| panic!("marker split failed: {e}"));
    for post in &thread.posts {
        println!("{}", post);
    }
}
