use super::App;
use anyhow::Result;
use colored::Colorize;
use skillswap_application::{CARDS_PER_VIEW, MatchCarousel};
use skillswap_core::matching::MatchSuggestion;

pub async fn browse(app: &App, page: usize) -> Result<()> {
    let viewer = app.viewer().await?;
    let list = app.matches.load(viewer.id()).await;
    if list.matches.is_empty() {
        println!(
            "{}",
            "No matches yet. Add skills to your profile to find partners.".bright_black()
        );
        return Ok(());
    }

    let mut carousel = MatchCarousel::new(list.matches);
    for _ in 0..page {
        carousel.next();
    }

    let start = carousel.start_index();
    println!(
        "{}",
        format!(
            "Matches {}-{} of {}{}",
            start + 1,
            start + carousel.visible().len(),
            carousel.len(),
            if list.ai_enabled { " (AI matching)" } else { "" }
        )
        .bold()
    );
    for suggestion in carousel.visible() {
        print_card(suggestion);
    }
    if start + CARDS_PER_VIEW < carousel.len() {
        println!("{}", format!("More: --page {}", page + 1).bright_black());
    }
    Ok(())
}

fn print_card(suggestion: &MatchSuggestion) {
    let profile = &suggestion.profile;
    println!();
    println!(
        "{} {}",
        profile.name.bright_cyan(),
        format!("(user {}, rating {:.1})", profile.id, profile.average_rating).bright_black()
    );
    if let Some(location) = &profile.location {
        println!("  Location: {}", location);
    }
    if !suggestion.offer_matches.is_empty() {
        println!("  Wants to learn from you: {}", suggestion.offer_matches.join(", "));
    }
    if !suggestion.learn_matches.is_empty() {
        println!("  Can teach you: {}", suggestion.learn_matches.join(", "));
    }
    println!("  {}", format!("skillswap start {}", profile.id).bright_black());
}
