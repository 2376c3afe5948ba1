//! Primitive emission for each kind of game element

use glam::Vec2;

use super::{Color, DrawSurface, TextAlign, TextStyle, colors, hex};
use crate::sim::{Craft, Hazard, Particle, Pickup, Projectile, Rect, Side};

/// Offset rect relative to an entity's top-left corner
fn part(origin: Vec2, x: f32, y: f32, width: f32, height: f32) -> Rect {
    Rect::new(origin.x + x, origin.y + y, width, height)
}

/// Hull, cockpit, wings, and engine glow; hull turns yellow while invincible
pub fn craft<S: DrawSurface + ?Sized>(surface: &mut S, craft: &Craft) {
    let (hull, wing) = if craft.invincible {
        (colors::CRAFT_SHIELDED, colors::CRAFT_WING_SHIELDED)
    } else {
        (colors::CRAFT, colors::CRAFT_WING)
    };
    let o = craft.pos;
    let size = craft.size;

    surface.fill_rect(craft.bounds(), hull);
    surface.fill_rect(part(o, size.x * 0.625, size.y / 3.0, 10.0, 10.0), colors::COCKPIT);
    surface.fill_rect(part(o, 0.0, -5.0, 15.0, 5.0), wing);
    surface.fill_rect(part(o, 0.0, size.y, 15.0, 5.0), wing);

    if !craft.invincible {
        surface.fill_rect(part(o, -5.0, size.y * 0.4, 5.0, 6.0), colors::ENGINE);
    }
}

/// Body, two eyes with pupils, and antennae
pub fn hazard<S: DrawSurface + ?Sized>(surface: &mut S, hazard: &Hazard) {
    let o = hazard.pos;

    surface.fill_rect(hazard.bounds(), colors::HAZARD);

    surface.fill_rect(part(o, 8.0, 10.0, 8.0, 8.0), colors::EYE);
    surface.fill_rect(part(o, 20.0, 10.0, 8.0, 8.0), colors::EYE);
    surface.fill_rect(part(o, 10.0, 12.0, 4.0, 4.0), colors::PUPIL);
    surface.fill_rect(part(o, 22.0, 12.0, 4.0, 4.0), colors::PUPIL);

    surface.fill_rect(part(o, 12.0, -5.0, 3.0, 5.0), colors::HAZARD);
    surface.fill_rect(part(o, 20.0, -5.0, 3.0, 5.0), colors::HAZARD);
}

/// Projectiles are drawn centered on their y
pub fn projectile<S: DrawSurface + ?Sized>(surface: &mut S, projectile: &Projectile) {
    let color = match projectile.side {
        Side::Ally => colors::ALLY_SHOT,
        Side::Hostile => colors::HOSTILE_SHOT,
    };
    let rect = Rect::new(
        projectile.pos.x,
        projectile.pos.y - projectile.size.y / 2.0,
        projectile.size.x,
        projectile.size.y,
    );
    surface.fill_rect(rect, color);
}

/// Spinning box with an upright question mark
pub fn pickup<S: DrawSurface + ?Sized>(surface: &mut S, pickup: &Pickup) {
    let center = pickup.pos + pickup.size / 2.0;
    surface.fill_rotated_rect(
        center,
        pickup.size,
        pickup.rotation,
        colors::PICKUP,
        Some(colors::PICKUP_BORDER),
    );
    surface.fill_text(
        "?",
        center,
        TextStyle {
            size: 20.0,
            color: colors::PICKUP_MARK,
            bold: true,
            align: TextAlign::Center,
        },
    );
}

/// Fades out with remaining life
pub fn particle<S: DrawSurface + ?Sized>(surface: &mut S, particle: &Particle) {
    let color: Color = hex(particle.color, particle.life.clamp(0.0, 1.0));
    surface.fill_rect(
        Rect::new(particle.pos.x, particle.pos.y, particle.size, particle.size),
        color,
    );
}
