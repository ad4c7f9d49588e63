use minegrid_core::{CellView, MinefieldGenerator, Session, Status, Summary};

fn glyph(view: CellView) -> char {
    match view {
        CellView::Hidden => '.',
        CellView::Flagged => 'F',
        CellView::Revealed(0) => ' ',
        CellView::Revealed(count) => char::from_digit(count.into(), 10).unwrap_or('?'),
        CellView::Mine => '*',
        CellView::Exploded => 'X',
        CellView::WrongFlag => 'x',
    }
}

pub fn status_message(status: Status) -> &'static str {
    match status {
        Status::Playing => "Playing",
        Status::Won => "You won!",
        Status::Lost => "Sorry, you lost!",
    }
}

/// Draws the grid with 1-based column and row labels.
pub fn render_grid<G: MinefieldGenerator>(session: &Session<G>) -> String {
    let (columns, rows) = session.settings().size();
    let mut s = String::new();

    s.push_str("    ");
    for x in 0..columns {
        s.push_str(&format!("{:>2} ", x + 1));
    }
    s.push('\n');
    s.push_str("   ");
    s.push_str(&"-".repeat(usize::from(columns) * 3 + 1));
    s.push('\n');

    for y in 0..rows {
        s.push_str(&format!("{:>2} | ", y + 1));
        for x in 0..columns {
            s.push(session.view((x, y)).map(glyph).unwrap_or('?'));
            s.push_str("  ");
        }
        s.push('\n');
    }
    s
}

pub fn render_status(summary: &Summary, elapsed: &str) -> String {
    format!(
        "{} | moves: {} | mines left: {} | time: {}",
        status_message(summary.status),
        summary.moves,
        summary.mines_remaining,
        elapsed
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use minegrid_core::{LayoutGenerator, Settings};

    fn session() -> Session<LayoutGenerator> {
        let settings = Settings::new(2, 3, 1).unwrap();
        Session::new(settings, LayoutGenerator::single(&[(2, 1)]))
    }

    #[test]
    fn labels_line_up_past_nine() {
        let settings = Settings::new(10, 10, 1).unwrap();
        let session = Session::new(settings, LayoutGenerator::single(&[(9, 9)]));
        let grid = render_grid(&session);
        let lines: Vec<&str> = grid.lines().collect();

        assert_eq!(lines.len(), 12);
        assert!(lines[0].ends_with(" 9 10 "), "{grid}");
        assert!(lines[11].starts_with("10 | .  "), "{grid}");
        assert_eq!(lines[2].len(), lines[11].len());
    }

    #[test]
    fn hidden_grid() {
        let grid = render_grid(&session());

        assert_eq!(
            grid,
            "     1  2  3 \n   ----------\n 1 | .  .  .  \n 2 | .  .  .  \n"
        );
    }

    #[test]
    fn revealed_and_lost_grid() {
        let mut session = session();
        session.reveal((0, 0)).unwrap();
        session.toggle_flag((2, 0)).unwrap();
        session.reveal((2, 1)).unwrap();

        let grid = render_grid(&session);
        assert!(grid.contains(" 1 |    1  x  \n"), "{grid}");
        assert!(grid.contains(" 2 |    1  X  \n"), "{grid}");
        assert_eq!(
            render_status(&session.summary(), "3"),
            "Sorry, you lost! | moves: 3 | mines left: 0 | time: 3"
        );
    }
}
