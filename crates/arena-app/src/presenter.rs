//! Presentation seam. The game loop hands every snapshot to a `Presenter`;
//! the headless driver ships a logging presenter and a JSON-lines presenter.

use std::io::Write;

use arena_core::constants::TICK_RATE;
use arena_core::enums::GamePhase;
use arena_core::events::GameEvent;
use arena_core::state::GameStateSnapshot;
use arena_core::types::Obstacle;

/// Receives simulation output once per tick.
pub trait Presenter {
    /// Static obstacle layout, delivered once before the first tick.
    fn obstacles(&mut self, _obstacles: &[Obstacle]) {}

    fn present(&mut self, snapshot: &GameStateSnapshot);
}

/// Logs sound cues, game events, and a once-per-second status line.
#[derive(Debug, Default)]
pub struct LogPresenter {
    last_phase: Option<GamePhase>,
}

impl LogPresenter {
    pub fn status_line(snapshot: &GameStateSnapshot) -> String {
        let ammo = snapshot
            .player
            .ammo
            .iter()
            .map(|a| format!("{} {}/{}", a.weapon, a.rounds, a.max_rounds))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "[{}] level {} | health {} | {} equipped | ammo: {} | enemies {} | powerups {} | kills {}",
            snapshot.phase,
            snapshot.level,
            snapshot.player.health,
            snapshot.player.weapon,
            ammo,
            snapshot.enemies.len(),
            snapshot.powerups.len(),
            snapshot.score.enemies_killed,
        )
    }
}

impl Presenter for LogPresenter {
    fn obstacles(&mut self, obstacles: &[Obstacle]) {
        for obstacle in obstacles {
            log::debug!(
                "obstacle at ({:.1}, {:.1}, {:.1})",
                obstacle.position.x,
                obstacle.position.y,
                obstacle.position.z
            );
        }
    }

    fn present(&mut self, snapshot: &GameStateSnapshot) {
        for cue in &snapshot.sound_cues {
            log::debug!("sound: {}", cue.name());
        }

        for event in &snapshot.events {
            match event {
                GameEvent::EnemyHit { .. } | GameEvent::PlayerDamaged { .. } => {
                    log::debug!("{event:?}")
                }
                _ => log::info!("{event:?}"),
            }
        }

        let phase_changed = self.last_phase != Some(snapshot.phase);
        let on_second = snapshot.time.tick % TICK_RATE as u64 == 0;
        if phase_changed || (snapshot.phase == GamePhase::Playing && on_second) {
            log::info!("{}", Self::status_line(snapshot));
        }
        self.last_phase = Some(snapshot.phase);
    }
}

/// Writes one JSON object per snapshot that carries cues or events, plus
/// every phase change.
pub struct JsonLinesPresenter<W: Write> {
    out: W,
    last_phase: Option<GamePhase>,
}

impl<W: Write> JsonLinesPresenter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            last_phase: None,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Presenter for JsonLinesPresenter<W> {
    fn present(&mut self, snapshot: &GameStateSnapshot) {
        let phase_changed = self.last_phase != Some(snapshot.phase);
        self.last_phase = Some(snapshot.phase);
        if !phase_changed && snapshot.sound_cues.is_empty() && snapshot.events.is_empty() {
            return;
        }

        let written = serde_json::to_writer(&mut self.out, snapshot)
            .map_err(std::io::Error::from)
            .and_then(|()| writeln!(self.out))
            .and_then(|()| self.out.flush());
        if let Err(err) = written {
            log::warn!("failed to write snapshot: {err}");
        }
    }
}
