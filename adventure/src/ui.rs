//! Terminal drawing for the game session

use crate::game::{describe, Game, Phase};
use combat_core::Combatant;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

pub fn draw(f: &mut Frame, game: &Game, input: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Title
            Constraint::Length(13), // Scene and hero
            Constraint::Min(6),     // Messages
            Constraint::Length(3),  // Input
            Constraint::Length(3),  // Controls
        ])
        .split(f.area());

    draw_title(f, game, chunks[0]);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[1]);

    match game.battle() {
        Some(battle) => draw_enemy(f, battle.enemy(), main_chunks[0]),
        None => draw_area(f, game, main_chunks[0]),
    }
    draw_hero(f, game, main_chunks[1]);
    draw_messages(f, game, chunks[2]);

    let input_widget = Paragraph::new(Line::from(vec![
        Span::styled("> ", Style::default().fg(Color::Green)),
        Span::raw(input),
    ]))
    .block(Block::default().borders(Borders::ALL).title(game.prompt()));
    f.render_widget(input_widget, chunks[3]);

    let controls = Paragraph::new("[ENTER] Submit    [BACKSPACE] Delete    [ESC] Quit")
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(controls, chunks[4]);
}

fn draw_title(f: &mut Frame, game: &Game, area: Rect) {
    let (text, color) = match game.phase() {
        Phase::Naming | Phase::ConfirmName(_) => ("Stone Age Adventure".to_string(), Color::Cyan),
        Phase::Won => ("Stone Age Adventure - You are free!".to_string(), Color::Green),
        Phase::Lost => ("Stone Age Adventure - Game Over".to_string(), Color::Red),
        Phase::Battle => {
            let round = game.battle().map(|b| b.round()).unwrap_or_default();
            (format!("Battle - Round {}", round), Color::Red)
        }
        Phase::Exploring => match game.current_area() {
            Some(location) => (format!("{} - {}", location.region, location.name), Color::Cyan),
            None => ("Stone Age Adventure".to_string(), Color::Cyan),
        },
    };
    let title = Paragraph::new(text)
        .style(Style::default().fg(color))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, area);
}

fn draw_area(f: &mut Frame, game: &Game, area: Rect) {
    let lines: Vec<Line> = match (game.phase(), game.current_area()) {
        (Phase::Naming | Phase::ConfirmName(_), _) | (_, None) => {
            vec![Line::from("Darkness. Soft whispers.")]
        }
        (_, Some(location)) => describe(location).into_iter().map(Line::from).collect(),
    };
    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Area"));
    f.render_widget(widget, area);
}

fn draw_enemy(f: &mut Frame, enemy: &Combatant, area: Rect) {
    let hp_pct = if enemy.hp_max() == 0 {
        0
    } else {
        (enemy.hp() as u64 * 10 / enemy.hp_max() as u64) as usize
    };
    let hp_bar = format!(
        "[{}{}]",
        "█".repeat(hp_pct.min(10)),
        "░".repeat(10 - hp_pct.min(10))
    );

    let mut lines = vec![Line::from(vec![Span::styled(
        enemy.name.clone(),
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    )])];
    if enemy.is_group() {
        lines.push(Line::from(format!("Group of {}", enemy.group_size())));
    }
    lines.push(Line::from(format!(
        "HP: {} {}/{}",
        hp_bar,
        enemy.hp(),
        enemy.hp_max()
    )));
    lines.push(Line::from(format!("Agility: {}", enemy.agility())));
    lines.push(Line::from(format!("Attack: {}", enemy.damage())));
    lines.push(Line::from(format!("Crit Chance: {}%", enemy.crit_chance())));
    if !enemy.inflict_sickness().is_zero() {
        lines.push(Line::from(format!("Poison: {}", enemy.inflict_sickness())));
    }
    if enemy.sickness() > 0 {
        lines.push(Line::from(format!("Sickness: {}", enemy.sickness())));
    }

    let widget =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Enemy"));
    f.render_widget(widget, area);
}

fn draw_hero(f: &mut Frame, game: &Game, area: Rect) {
    let hero = game.hero();
    let mut lines = vec![
        Line::from(vec![Span::styled(
            hero.name.clone(),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )]),
        Line::from(format!("HP: {}/{}", hero.hp(), hero.hp_max())),
        Line::from(format!("Agility: {}", hero.agility())),
    ];
    if hero.sickness() > 0 {
        lines.push(Line::from(Span::styled(
            format!("Sickness: {}", hero.sickness()),
            Style::default().fg(Color::Magenta),
        )));
    }
    if let Some(loadout) = hero.loadout() {
        lines.push(Line::from(""));
        lines.push(Line::from(format!(
            "Weapon: {} ({})",
            loadout.weapon.name, loadout.weapon.damage
        )));
        lines.push(Line::from(format!(
            "Armour: {} ({}%)",
            loadout.armour.name,
            loadout.armour.reduction_percent()
        )));
        if loadout.is_defending() {
            lines.push(Line::from(Span::styled(
                "Defending",
                Style::default().fg(Color::Blue),
            )));
        }
    }

    let world = game.world();
    lines.push(Line::from(""));
    lines.push(Line::from(format!(
        "Areas cleared: {}/{}",
        world.cleared_count(),
        world.area_count()
    )));
    if let Some(location) = game.current_area() {
        if let Some((cleared, total)) = world.region_progress(&location.region) {
            lines.push(Line::from(format!(
                "{}: {}/{}",
                location.region, cleared, total
            )));
        }
    }

    let widget = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Hero"));
    f.render_widget(widget, area);
}

fn draw_messages(f: &mut Frame, game: &Game, area: Rect) {
    let visible = area.height.saturating_sub(2) as usize;
    let messages = game.messages();
    let start = messages.len().saturating_sub(visible);
    let items: Vec<ListItem> = messages[start..]
        .iter()
        .map(|m| {
            let style = if m.starts_with('>') {
                Style::default().fg(Color::DarkGray)
            } else if m.contains("CRITICAL") || m.contains("defeated") {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            ListItem::new(m.as_str()).style(style)
        })
        .collect();
    let widget = List::new(items).block(Block::default().borders(Borders::ALL).title("Log"));
    f.render_widget(widget, area);
}
