use super::App;
use anyhow::Result;
use colored::Colorize;
use skillswap_core::conversation::{Conversation, Message};
use skillswap_core::{ConversationId, UserId};

pub async fn list(app: &App) -> Result<()> {
    let snapshot = app.conversations().snapshot().await;
    app.flush_notices().await;

    if snapshot.conversations.is_empty() {
        println!("{}", "No chats yet. Start one from your matches.".bright_black());
        return Ok(());
    }

    let active = snapshot.active.as_ref().map(Conversation::id);
    for conversation in &snapshot.conversations {
        print_conversation(conversation, active == Some(conversation.id()));
    }
    Ok(())
}

pub async fn open(app: &App, chat_id: i64) -> Result<()> {
    let conversations = app.conversations();
    let result = conversations.select(ConversationId(chat_id)).await;
    app.flush_notices().await;
    result?;
    print_thread(app).await
}

pub async fn send(app: &App, chat_id: i64, text: &str) -> Result<()> {
    let viewer = app.viewer().await?;
    let selected = app.conversations().select(ConversationId(chat_id)).await;
    if let Err(e) = selected {
        app.flush_notices().await;
        return Err(e.into());
    }

    let result = app.session.send_message(text).await;
    app.flush_notices().await;
    let message = result?;
    print_message(&message, viewer.id());
    Ok(())
}

pub async fn start(app: &App, user_id: i64) -> Result<()> {
    let result = app.conversations().start_conversation(UserId(user_id)).await;
    app.flush_notices().await;
    let conversation_id = result?;
    println!("{}", format!("Chat {} is open.", conversation_id).green());
    print_thread(app).await
}

pub async fn rate(app: &App, chat_id: i64, score: u8, comment: Option<String>) -> Result<()> {
    let result = app
        .conversations()
        .submit_rating(ConversationId(chat_id), score, comment)
        .await;
    app.flush_notices().await;
    result?;
    Ok(())
}

async fn print_thread(app: &App) -> Result<()> {
    let viewer = app.viewer().await?;
    let snapshot = app.conversations().snapshot().await;
    if let Some(active) = &snapshot.active {
        println!(
            "{}",
            format!("── {} ──", active.display_name().unwrap_or("Unknown")).bold()
        );
    }
    if snapshot.messages.is_empty() {
        println!("{}", "No messages yet.".bright_black());
    }
    for message in &snapshot.messages {
        print_message(message, viewer.id());
    }
    Ok(())
}

fn print_conversation(conversation: &Conversation, is_active: bool) {
    let marker = if is_active { "*" } else { " " };
    let name = conversation.display_name().unwrap_or("Unknown");
    let mut line = format!("{} [{}] {}", marker, conversation.id(), name);
    if conversation.has_unread() {
        line = format!("{} ({} unread)", line, conversation.unread_count());
    }
    if conversation.is_rated_by_viewer() {
        line = format!("{} ✓ rated", line);
    }
    if conversation.has_unread() {
        println!("{}", line.bold());
    } else {
        println!("{}", line);
    }
}

fn print_message(message: &Message, viewer: UserId) {
    let time = message.timestamp.format("%Y-%m-%d %H:%M");
    let author = if message.is_from(viewer) {
        "You".to_string()
    } else {
        message
            .sender_name
            .clone()
            .unwrap_or_else(|| format!("User {}", message.sender_id))
    };
    let header = format!("[{}] {}", time, author);
    if message.is_from(viewer) {
        println!("{} {}", header.bright_blue(), message.content);
    } else {
        println!("{} {}", header.bright_magenta(), message.content);
    }
}
