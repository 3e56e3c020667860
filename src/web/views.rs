use axum::extract::State;
use axum::response::Html;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use leptos::prelude::*;

use super::AppState;
use crate::models::Activity;

const STYLE: &str = include_str!("../style.css");

pub(crate) async fn roster_page_handler(State(state): State<AppState>) -> Html<String> {
    let activities = state.roster().list_activities().to_vec();
    let now = Utc::now().with_timezone(&state.timezone);
    Html(render_page(&state.school_name, &activities, now))
}

pub(super) fn render_page(school_name: &str, activities: &[Activity], now: DateTime<Tz>) -> String {
    let title = format!("{school_name} Activities");
    let heading = title.clone();
    let updated = format!("Updated: {}", now.format("%Y-%m-%d %H:%M:%S %Z"));
    let activities_html: String = activities.iter().map(render_activity).collect();

    view! {
        <html lang="en">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <title>{title}</title>
                <style>{STYLE}</style>
            </head>
            <body>
                <h1>{heading}</h1>
                <p class="timestamp">{updated}</p>
                <div inner_html=activities_html />
            </body>
        </html>
    }
    .to_html()
}

fn render_activity(activity: &Activity) -> String {
    let name = activity.name.clone();
    let description = activity.description.clone();
    let schedule = format!("Schedule: {}", activity.schedule);
    let spots_left = activity.spots_left();
    let availability = format!("{spots_left} of {} spots left", activity.max_participants);
    let css = if spots_left == 0 {
        "availability full"
    } else {
        "availability"
    }
    .to_string();
    let participants_html = render_participants(&activity.participants);

    view! {
        <section>
            <h2>{name}</h2>
            <p>{description}</p>
            <p class="schedule">{schedule}</p>
            <p class=css>{availability}</p>
            <div inner_html=participants_html />
        </section>
    }
    .to_html()
}

fn render_participants(participants: &[String]) -> String {
    if participants.is_empty() {
        return view! { <p class="empty">"No participants yet."</p> }.to_html();
    }

    let items_html: String = participants
        .iter()
        .map(|p| {
            let p = p.clone();
            view! { <li>{p}</li> }.to_html()
        })
        .collect();

    view! { <ul class="participants" inner_html=items_html /> }.to_html()
}
