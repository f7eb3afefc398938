use crate::core::{CellKind, Level, Vec2};

/// Draws the used part of the grid with the usual Sokoban symbols:
/// `#` wall, ` ` floor, `.` target, `$` box, `*` box on target, `@` player,
/// `+` player on target, `-` blank or missing cell.
pub fn render_level_to_string(level: &Level) -> String {
    let extent = level.grid().used_extent();
    let mut result = String::new();
    for y in 0..extent.y {
        for x in 0..extent.x {
            let pos = Vec2::new(x, y);
            let has_player = pos == level.player().position;
            let has_box = level.has_box_at(pos);
            let ch = match level.grid().kind_at(pos) {
                None | Some(CellKind::Blank) => '-',
                Some(CellKind::Wall) => '#',
                Some(CellKind::Floor) => {
                    if has_player {
                        '@'
                    } else if has_box {
                        '$'
                    } else {
                        ' '
                    }
                }
                Some(CellKind::Target) => {
                    if has_player {
                        '+'
                    } else if has_box {
                        '*'
                    } else {
                        '.'
                    }
                }
            };
            result.push(ch);
        }
        result.push('\n');
    }
    result
}
