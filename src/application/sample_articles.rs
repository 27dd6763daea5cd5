//! Static article catalogue shown in the feed.

use chrono::{DateTime, Duration, Utc};

use crate::domain::entities::{Article, Highlight, HighlightTone, Section};

/// Bullets shown under "Key Highlights" for every article.
pub const HIGHLIGHTS: &[Highlight] = &[
    Highlight {
        icon: "✔",
        text: "Breakthrough technology implementation",
        tone: HighlightTone::Green,
    },
    Highlight {
        icon: "★",
        text: "Industry-leading innovation",
        tone: HighlightTone::Blue,
    },
    Highlight {
        icon: "↗",
        text: "Significant performance improvements",
        tone: HighlightTone::Orange,
    },
    Highlight {
        icon: "◍",
        text: "Global impact potential",
        tone: HighlightTone::Purple,
    },
];

/// Longer sections appended after the article body.
pub const SECTIONS: &[Section] = &[
    Section {
        title: "Impact & Analysis",
        body: "This groundbreaking development represents a significant shift in how we approach technological innovation. The implications extend far beyond the immediate application, potentially revolutionizing entire industries and creating new paradigms for future research and development.

Expert analysis suggests that this advancement could accelerate progress in related fields by decades, offering unprecedented opportunities for collaboration and cross-disciplinary innovation. The methodology employed here sets a new standard for scientific rigor and practical application.

Furthermore, the environmental and economic benefits of this breakthrough cannot be overstated. Early projections indicate substantial reductions in resource consumption while simultaneously improving output quality and efficiency metrics across multiple sectors.",
    },
    Section {
        title: "Future Outlook",
        body: "Looking ahead, researchers are optimistic about the scalability and broader applications of this technology. Several major institutions have already expressed interest in collaborative research initiatives, and funding for expanded studies has been secured through multiple channels.

The next phase of development will focus on optimization and real-world implementation scenarios. Beta testing programs are scheduled to begin in the coming months, with commercial applications anticipated within the next two years.

This represents just the beginning of what promises to be a transformative period in the field, with potential applications extending into healthcare, education, environmental science, and beyond.",
    },
];

/// Builds the fixed article set, timestamped relative to `now`.
#[must_use]
pub fn sample_articles(now: DateTime<Utc>) -> Vec<Article> {
    vec![
        Article::new(
            "a1",
            "Revolutionary AI Breakthrough",
            "Scientists achieve quantum leap in machine learning",
            "Lorem ipsum dolor sit amet, consectetur adipiscing elit. Sed do eiusmod tempor incididunt ut labore et dolore magna aliqua. Ut enim ad minim veniam, quis nostrud exercitation ullamco laboris nisi ut aliquip ex ea commodo consequat.

Duis aute irure dolor in reprehenderit in voluptate velit esse cillum dolore eu fugiat nulla pariatur. Excepteur sint occaecat cupidatat non proident, sunt in culpa qui officia deserunt mollit anim id est laborum.

Sed ut perspiciatis unde omnis iste natus error sit voluptatem accusantium doloremque laudantium, totam rem aperiam, eaque ipsa quae ab illo inventore veritatis et quasi architecto beatae vitae dicta sunt explicabo.

Nemo enim ipsam voluptatem quia voluptas sit aspernatur aut odit aut fugit, sed quia consequuntur magni dolores eos qui ratione voluptatem sequi nesciunt.",
            "Dr. Sarah Chen",
            now - Duration::hours(1),
        )
        .with_image_url("https://picsum.photos/800/600?random=1"),
        Article::new(
            "a2",
            "Climate Solutions Take Center Stage",
            "New technology promises to revolutionize carbon capture",
            "At vero eos et accusamus et iusto odio dignissimos ducimus qui blanditiis praesentium voluptatum deleniti atque corrupti quos dolores et quas molestias excepturi sint occaecati cupiditate non provident.

Similique sunt in culpa qui officia deserunt mollitia animi, id est laborum et dolorum fuga. Et harum quidem rerum facilis est et expedita distinctio.

Nam libero tempore, cum soluta nobis est eligendi optio cumque nihil impedit quo minus id quod maxime placeat facere possimus.",
            "Michael Torres",
            now - Duration::hours(2),
        )
        .with_image_url("https://picsum.photos/800/600?random=2"),
        Article::new(
            "a3",
            "Space Exploration Milestone",
            "First successful Mars colony simulation completed",
            "Temporibus autem quibusdam et aut officiis debitis aut rerum necessitatibus saepe eveniet ut et voluptates repudiandae sint et molestiae non recusandae.

Itaque earum rerum hic tenetur a sapiente delectus, ut aut reiciendis voluptatibus maiores alias consequatur aut perferendis doloribus asperiores repellat.

Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.",
            "Emma Rodriguez",
            now - Duration::hours(3),
        )
        .with_image_url("https://picsum.photos/800/600?random=3"),
        Article::new(
            "a4",
            "Tech Industry Transformation",
            "Major shift toward sustainable computing",
            "Ut enim ad minima veniam, quis nostrum exercitationem ullam corporis suscipit laboriosam, nisi ut aliquid ex ea commodi consequatur.

Quis autem vel eum iure reprehenderit qui in ea voluptate velit esse quam nihil molestiae consequatur, vel illum qui dolorem eum fugiat quo voluptas nulla pariatur.

But I must explain to you how all this mistaken idea of denouncing pleasure and praising pain was born and I will give you a complete account of the system.",
            "James Wilson",
            now - Duration::hours(4),
        )
        .with_image_url("https://picsum.photos/800/600?random=4"),
    ]
}
