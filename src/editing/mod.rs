use std::io::BufRead;

use bevy::prelude::*;
use crossbeam_channel::{Receiver, Sender};

use crate::prelude::*;

mod parameter_edit;

pub use parameter_edit::{EditParseError, ParameterEdit};

/// What the editing surface sends to the app.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorMessage {
    Edit(ParameterEdit),
    /// No more edits will arrive.
    Closed,
}

#[derive(Resource)]
struct EditReceiver(Receiver<EditorMessage>);

#[derive(Resource, Default)]
struct EditorClosed(bool);

/// Applies edits from a channel to the live parameters and exits once the channel is
/// closed and the last settled snapshot has been generated.
pub struct EditingPlugin {
    pub receiver: Receiver<EditorMessage>,
}

impl Plugin for EditingPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(EditReceiver(self.receiver.clone()))
            .init_resource::<EditorClosed>()
            .add_systems(
                Update,
                (
                    apply_parameter_edits.in_set(GalaxySystems::ApplyEdits),
                    exit_when_idle.after(GalaxySystems::Regenerate),
                ),
            );
    }
}

/// Reads one edit per line from stdin on a background thread. Blank lines and lines
/// starting with `#` are skipped, malformed lines are logged and dropped.
pub fn spawn_stdin_reader() -> Receiver<EditorMessage> {
    let (sender, receiver) = crossbeam_channel::unbounded();
    std::thread::spawn(move || read_edits(std::io::stdin().lock(), &sender));
    receiver
}

fn read_edits(input: impl BufRead, sender: &Sender<EditorMessage>) {
    for line in input.lines() {
        let Ok(line) = line else {
            break;
        };
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match line.parse::<ParameterEdit>() {
            Ok(edit) => {
                if sender.send(EditorMessage::Edit(edit)).is_err() {
                    return;
                }
            }
            Err(err) => warn!("Ignoring edit `{}`: {}", line, err),
        }
    }
    let _ = sender.send(EditorMessage::Closed);
}

fn apply_parameter_edits(
    receiver: Res<EditReceiver>,
    mut live: ResMut<LiveParameters>,
    mut closed: ResMut<EditorClosed>,
) {
    for message in receiver.0.try_iter() {
        match message {
            EditorMessage::Edit(edit) => {
                let next = edit.apply(&live.0);
                // untouched parameters must not restart the settle timer
                if next != live.0 {
                    info!("Parameter edit: {}", edit);
                    live.0 = next;
                }
            }
            EditorMessage::Closed => {
                info!("Parameter input closed");
                closed.0 = true;
            }
        }
    }
}

fn exit_when_idle(
    closed: Res<EditorClosed>,
    settle: Res<SettleTimer>,
    generation: Res<GalaxyGeneration>,
    points: Res<GalaxyPoints>,
    mut exit: EventWriter<AppExit>,
) {
    if closed.0 && !settle.is_pending() && points.generation == generation.0 {
        exit.write(AppExit::Success);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::galaxy::test_support::*;

    fn editing_app() -> (App, Sender<EditorMessage>) {
        let (sender, receiver) = crossbeam_channel::unbounded();
        let mut app = galaxy_app(small_parameters());
        app.add_plugins(EditingPlugin { receiver });
        (app, sender)
    }

    #[test]
    fn reader_skips_comments_and_bad_lines() {
        let input = "# tweak the arms\nbranches 5\n\nwarp 9\nspin -2\n";
        let (sender, receiver) = crossbeam_channel::unbounded();
        read_edits(input.as_bytes(), &sender);

        let messages: Vec<_> = receiver.try_iter().collect();
        assert_eq!(
            messages,
            vec![
                EditorMessage::Edit(ParameterEdit::Branches(5)),
                EditorMessage::Edit(ParameterEdit::Spin(-2.0)),
                EditorMessage::Closed,
            ]
        );
    }

    #[test]
    fn channel_edits_reach_the_point_cloud() {
        let (mut app, sender) = editing_app();
        app.update();

        sender
            .send(EditorMessage::Edit(ParameterEdit::Count(3_000)))
            .unwrap();
        sender
            .send(EditorMessage::Edit(ParameterEdit::Branches(6)))
            .unwrap();
        for _ in 0..4 {
            app.update();
        }

        assert_eq!(app.world().resource::<LiveParameters>().branches, 6);
        let points = app.world().resource::<GalaxyPoints>();
        assert_eq!(points.generation, 2);
        assert_eq!(points.cloud.as_ref().unwrap().len(), 3_000);
        assert_eq!(app.should_exit(), None);
    }

    #[test]
    fn closing_waits_for_pending_generation() {
        let (mut app, sender) = editing_app();
        app.update();

        sender
            .send(EditorMessage::Edit(ParameterEdit::Radius(8.0)))
            .unwrap();
        sender.send(EditorMessage::Closed).unwrap();
        app.update();
        assert_eq!(app.should_exit(), None);

        for _ in 0..3 {
            app.update();
        }
        assert_eq!(app.world().resource::<GalaxyPoints>().generation, 2);
        assert_eq!(app.should_exit(), Some(AppExit::Success));
    }

    #[test]
    fn no_op_edit_does_not_restart_settling() {
        let (mut app, sender) = editing_app();
        app.update();

        sender
            .send(EditorMessage::Edit(ParameterEdit::Branches(3)))
            .unwrap();
        app.update();
        assert!(!app.world().resource::<SettleTimer>().is_pending());
    }
}
