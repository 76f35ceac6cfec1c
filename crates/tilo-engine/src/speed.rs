//! Spin-speed feedback — faster after wins, slower after losses

/// Next spin speed from the current speed and the round's combo-slot score.
///
/// Four score bands cross six speed tiers; high speeds fall harder on a
/// loss, and only scores of 100+ keep pushing the speed up.
pub fn next_speed(speed: i32, current_score: i32) -> i32 {
    let delta = if current_score < 0 {
        match speed {
            ..2 => 0,
            2..4 => -1,
            4..6 => -2,
            6..8 => -3,
            8..10 => -4,
            _ => -5,
        }
    } else if current_score < 50 {
        match speed {
            ..2 => 1,
            2..4 => 0,
            4..6 => -1,
            6..8 => -2,
            8..10 => -3,
            _ => -4,
        }
    } else if current_score < 100 {
        match speed {
            ..2 => 1,
            2..4 => 1,
            4..6 => 0,
            6..8 => -1,
            8..10 => -2,
            _ => -3,
        }
    } else {
        match speed {
            10.. => 0,
            _ => 1,
        }
    };

    speed + delta
}
