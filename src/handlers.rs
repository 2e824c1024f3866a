use crate::calendar;
use crate::errors::AppError;
use crate::models::{
    CreateHabitRequest, EditHabitRequest, GridResponse, HabitResponse, ToggleRequest,
    ToggleResponse,
};
use crate::state::AppState;
use crate::store::ToggleOutcome;
use crate::ui::render_index;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::Html,
};
use chrono::{Datelike, Local};

pub async fn index() -> Html<&'static str> {
    Html(render_index())
}

pub async fn list_habits(
    State(state): State<AppState>,
) -> Result<Json<Vec<HabitResponse>>, AppError> {
    let habits = state.store.habits().await?;
    Ok(Json(habits.iter().map(HabitResponse::from_habit).collect()))
}

pub async fn create_habit(
    State(state): State<AppState>,
    Json(payload): Json<CreateHabitRequest>,
) -> Result<(StatusCode, Json<HabitResponse>), AppError> {
    let record = state.store.create_habit(&payload.name, payload.color).await?;
    Ok((StatusCode::CREATED, Json(HabitResponse::from_record(&record))))
}

pub async fn edit_habit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<EditHabitRequest>,
) -> Result<StatusCode, AppError> {
    state
        .store
        .edit_habit(&id, &payload.name, payload.color)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_habit(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.store.delete_habit(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn toggle_day(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<ToggleRequest>,
) -> Result<Json<ToggleResponse>, AppError> {
    let outcome = state
        .store
        .toggle_day(&id, payload.year, payload.month, payload.day)
        .await?;
    Ok(Json(ToggleResponse {
        habit_id: id,
        year: payload.year,
        month: payload.month,
        day: payload.day,
        marked: outcome == ToggleOutcome::Marked,
    }))
}

pub async fn habit_grid(
    State(state): State<AppState>,
    Path((id, year)): Path<(String, i32)>,
) -> Result<Json<GridResponse>, AppError> {
    let habits = state.store.habits().await?;
    let Some(habit) = habits.iter().find(|habit| habit.id == id) else {
        return Err(AppError::not_found(format!("no habit with id {id}")));
    };

    let today = Local::now().date_naive();
    let today_day_of_year =
        (today.year() == year).then(|| calendar::day_of_year_for_date(today));
    let first_weekday = calendar::first_weekday_of_year(year)?;
    // Past and future years report the streak as of December 31.
    let streak_as_of = today_day_of_year.unwrap_or_else(|| calendar::days_in_year(year));

    Ok(Json(GridResponse {
        habit_id: habit.id.clone(),
        name: habit.name.clone(),
        color: habit.color,
        year,
        days_in_year: calendar::days_in_year(year),
        first_weekday,
        leading_blanks: first_weekday - 1,
        today_day_of_year,
        marked_days: habit.drops.marked_days(year),
        total: habit.drops.count_in_year(year),
        streak: habit.drops.current_streak(streak_as_of, year),
        years: habit.drops.distinct_years(today.year()),
    }))
}
