//! Scripted viewpoint walks.
//!
//! A script is a comma-separated list of `action:frames[:pace]` steps.
//! Actions are compass moves (`n`, `s`, `e`, `w`, `ne`, `nw`, `se`, `sw`),
//! zoom steps (`in`, `out`) or `wait`. North is negative z.

use std::str::FromStr;

use terrascope_world::Pace;
use thiserror::Error;

/// Walk script parse errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalkError {
    /// Step is not `action:frames[:pace]`
    #[error("malformed step `{0}`")]
    Malformed(String),

    /// Unknown action name
    #[error("unknown action `{0}`")]
    UnknownAction(String),

    /// Frame count is not a positive integer
    #[error("invalid frame count `{0}`")]
    Frames(String),

    /// Unknown pace name
    #[error("unknown pace `{0}` (expected fast or slow)")]
    Pace(String),
}

/// What one step does every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Move the viewpoint along a direction.
    Move {
        /// X direction
        dx: f64,
        /// Z direction
        dz: f64,
    },
    /// Zoom in (positive) or out (negative).
    Zoom(f64),
    /// Do nothing.
    Wait,
}

/// One scripted step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WalkStep {
    /// Per-frame action
    pub action: Action,
    /// Frames the action repeats for
    pub frames: u32,
    /// Movement pace
    pub pace: Pace,
}

/// Parsed walk script.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Walk {
    steps: Vec<WalkStep>,
}

impl Walk {
    /// Returns the steps in order.
    #[must_use]
    pub fn steps(&self) -> &[WalkStep] {
        &self.steps
    }

    /// Total frames across all steps.
    #[must_use]
    pub fn total_frames(&self) -> u64 {
        self.steps.iter().map(|s| u64::from(s.frames)).sum()
    }

    /// Expands the script into one action per frame.
    pub fn frames(&self) -> impl Iterator<Item = (Action, Pace)> + '_ {
        self.steps.iter().flat_map(|step| {
            std::iter::repeat((step.action, step.pace)).take(step.frames as usize)
        })
    }
}

impl FromStr for Walk {
    type Err = WalkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let steps = s
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(parse_step)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { steps })
    }
}

fn parse_step(part: &str) -> Result<WalkStep, WalkError> {
    let fields: Vec<&str> = part.split(':').map(str::trim).collect();
    let (action, frames, pace) = match fields.as_slice() {
        [action, frames] => (*action, *frames, None),
        [action, frames, pace] => (*action, *frames, Some(*pace)),
        _ => return Err(WalkError::Malformed(part.to_string())),
    };

    let action = parse_action(action)?;
    let frames = frames
        .parse::<u32>()
        .ok()
        .filter(|&n| n > 0)
        .ok_or_else(|| WalkError::Frames(frames.to_string()))?;
    let pace = match pace {
        None => Pace::Normal,
        Some(p) if p.eq_ignore_ascii_case("fast") => Pace::Fast,
        Some(p) if p.eq_ignore_ascii_case("slow") => Pace::Slow,
        Some(p) => return Err(WalkError::Pace(p.to_string())),
    };

    Ok(WalkStep {
        action,
        frames,
        pace,
    })
}

fn parse_action(name: &str) -> Result<Action, WalkError> {
    let (dx, dz) = match name.to_ascii_lowercase().as_str() {
        "n" => (0.0, -1.0),
        "s" => (0.0, 1.0),
        "e" => (1.0, 0.0),
        "w" => (-1.0, 0.0),
        "ne" => (1.0, -1.0),
        "nw" => (-1.0, -1.0),
        "se" => (1.0, 1.0),
        "sw" => (-1.0, 1.0),
        "in" => return Ok(Action::Zoom(1.0)),
        "out" => return Ok(Action::Zoom(-1.0)),
        "wait" => return Ok(Action::Wait),
        _ => return Err(WalkError::UnknownAction(name.to_string())),
    };
    Ok(Action::Move { dx, dz })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_script() {
        let walk: Walk = "e:120, n:40:fast,in:3,wait:2,sw:1:SLOW".parse().expect("valid");
        assert_eq!(walk.steps().len(), 5);
        assert_eq!(walk.total_frames(), 166);
        assert_eq!(
            walk.steps()[1],
            WalkStep {
                action: Action::Move { dx: 0.0, dz: -1.0 },
                frames: 40,
                pace: Pace::Fast,
            }
        );
        assert_eq!(walk.steps()[2].action, Action::Zoom(1.0));
        assert_eq!(walk.steps()[4].pace, Pace::Slow);
    }

    #[test]
    fn test_empty_script() {
        let walk: Walk = "".parse().expect("valid");
        assert_eq!(walk.total_frames(), 0);
        assert_eq!(walk.frames().count(), 0);
    }

    #[test]
    fn test_frames_expand() {
        let walk: Walk = "e:2,wait:1".parse().expect("valid");
        let frames: Vec<_> = walk.frames().map(|(action, _)| action).collect();
        assert_eq!(
            frames,
            vec![
                Action::Move { dx: 1.0, dz: 0.0 },
                Action::Move { dx: 1.0, dz: 0.0 },
                Action::Wait,
            ]
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "up:3".parse::<Walk>(),
            Err(WalkError::UnknownAction("up".into()))
        );
        assert_eq!("e".parse::<Walk>(), Err(WalkError::Malformed("e".into())));
        assert_eq!("e:0".parse::<Walk>(), Err(WalkError::Frames("0".into())));
        assert_eq!("e:x".parse::<Walk>(), Err(WalkError::Frames("x".into())));
        assert_eq!(
            "e:1:warp".parse::<Walk>(),
            Err(WalkError::Pace("warp".into()))
        );
    }
}
