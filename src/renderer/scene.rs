//! Scene drawing: turns a `GameState` into `DrawSurface` calls

use glam::Vec2;

use super::surface::DrawSurface;
use crate::colors;
use crate::consts::TRAIL_FADE;
use crate::sim::GameState;

/// Size of one cell of the score-label font
const GLYPH_CELL: f32 = 2.0;
/// Glyph width in cells, plus one cell of spacing
const GLYPH_ADVANCE: f32 = 4.0 * GLYPH_CELL;

/// 3x5 digit bitmaps, one row per entry, high bit on the left
const DIGITS: [[u8; 5]; 10] = [
    [0b111, 0b101, 0b101, 0b101, 0b111],
    [0b010, 0b110, 0b010, 0b010, 0b111],
    [0b111, 0b001, 0b111, 0b100, 0b111],
    [0b111, 0b001, 0b111, 0b001, 0b111],
    [0b101, 0b101, 0b111, 0b001, 0b001],
    [0b111, 0b100, 0b111, 0b001, 0b111],
    [0b111, 0b100, 0b111, 0b101, 0b111],
    [0b111, 0b001, 0b010, 0b010, 0b010],
    [0b111, 0b101, 0b111, 0b101, 0b111],
    [0b111, 0b101, 0b111, 0b001, 0b111],
];

/// Draw one frame, back to front
pub fn draw_scene<S: DrawSurface>(surface: &mut S, state: &GameState) {
    surface.fade(TRAIL_FADE);

    for dot in &state.background {
        surface.with_alpha(dot.alpha, |s| s.circle(dot.pos, dot.radius, dot.color));
    }

    let player = &state.player;
    surface.pixel_circle(player.pos, player.radius, player.color);

    for power_up in &state.power_ups {
        surface.with_alpha(power_up.alpha(state.time_ms), |s| {
            s.sprite(power_up.pos, power_up.radius, power_up.rotation, colors::BOLT)
        });
    }

    for particle in &state.particles {
        surface.with_alpha(particle.alpha, |s| {
            s.circle(particle.pos, particle.radius, particle.color)
        });
    }

    for projectile in &state.projectiles {
        surface.circle(projectile.pos, projectile.radius, projectile.color);
    }

    for enemy in &state.enemies {
        surface.pixel_circle(enemy.pos, enemy.radius, enemy.color);
        surface.circle(enemy.pos, enemy.radius, enemy.color);
    }

    for label in &state.score_labels {
        surface.with_alpha(label.alpha(), |s| {
            draw_number(s, label.pos(), label.points, colors::SCORE_LABEL)
        });
    }
}

/// Draw `value` in the block font with its top-left corner at `origin`
pub fn draw_number<S: DrawSurface>(surface: &mut S, origin: Vec2, value: u64, color: crate::Color) {
    let text = value.to_string();
    for (i, ch) in text.bytes().enumerate() {
        let glyph = &DIGITS[usize::from(ch - b'0')];
        let left = origin.x + i as f32 * GLYPH_ADVANCE;
        for (row, bits) in glyph.iter().enumerate() {
            for col in 0..3 {
                if bits & (0b100 >> col) != 0 {
                    surface.rect(
                        Vec2::new(
                            left + col as f32 * GLYPH_CELL,
                            origin.y + row as f32 * GLYPH_CELL,
                        ),
                        Vec2::splat(GLYPH_CELL),
                        color,
                    );
                }
            }
        }
    }
}
