use super::App;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use skillswap_core::user::{ProfileUpdate, UserProfile};
use std::path::Path;

/// Profile fields to change; without any, the profile is printed.
#[derive(Args, Debug, Default)]
pub struct ProfileEdit {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    pronouns: Option<String>,
    #[arg(long)]
    bio: Option<String>,
    #[arg(long)]
    location: Option<String>,
    #[arg(long)]
    availability: Option<String>,
    #[arg(long)]
    learning_style: Option<String>,
    /// Skills you can teach, comma separated (at most 3 are kept)
    #[arg(long, value_delimiter = ',')]
    offer: Option<Vec<String>>,
    /// Skills you want to learn, comma separated (at most 3 are kept)
    #[arg(long, value_delimiter = ',')]
    learn: Option<Vec<String>>,
}

impl ProfileEdit {
    fn into_update(self) -> ProfileUpdate {
        let mut update = ProfileUpdate::new();
        update.name = self.name;
        update.pronouns = self.pronouns;
        if let Some(bio) = self.bio {
            update = update.with_bio(bio);
        }
        if let Some(location) = self.location {
            update = update.with_location(location);
        }
        if let Some(availability) = self.availability {
            update = update.with_availability(availability);
        }
        if let Some(style) = self.learning_style {
            update = update.with_learning_style(style);
        }
        if let Some(skills) = self.offer {
            update = update.with_skills_to_offer(skills);
        }
        if let Some(skills) = self.learn {
            update = update.with_skills_to_learn(skills);
        }
        update
    }
}

pub async fn show_or_edit(app: &App, edit: ProfileEdit) -> Result<()> {
    let update = edit.into_update();
    if update.is_empty() {
        let viewer = app.viewer().await?;
        print_profile(viewer.profile());
        return Ok(());
    }

    let result = app.session.save_profile(update).await;
    app.flush_notices().await;
    let profile = result?;
    println!("{}", "Profile updated.".green());
    print_profile(&profile);
    Ok(())
}

pub async fn avatar(app: &App, path: &Path) -> Result<()> {
    let result = app.session.upload_profile_image_from_path(path).await;
    app.flush_notices().await;
    let url = result?;
    println!("{}", format!("Profile image uploaded: {}", url).green());
    Ok(())
}

fn print_profile(profile: &UserProfile) {
    let pronouns = profile
        .pronouns
        .as_deref()
        .map(|p| format!(" ({})", p))
        .unwrap_or_default();
    println!("{}{}", profile.name.bold(), pronouns);
    println!("  {}", profile.email.bright_black());
    let fields = [
        ("Bio", &profile.bio),
        ("Location", &profile.location),
        ("Availability", &profile.availability),
        ("Learning style", &profile.learning_style),
        ("Image", &profile.image_url),
    ];
    for (label, value) in fields {
        if let Some(value) = value {
            println!("  {}: {}", label, value);
        }
    }
    println!("  Offers: {}", profile.skills_to_offer.join(", "));
    println!("  Learning: {}", profile.skills_to_learn.join(", "));
    println!("  Rating: {:.1}", profile.average_rating);
}
