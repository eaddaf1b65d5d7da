/// One frame/clip binding: when `frame` is displayed, clip `audio` starts.
///
/// Several triggers may share a frame (all fire) or a clip (independent
/// overlapping playback instances).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Trigger {
    /// 0-based frame index.
    pub frame: u32,
    /// 0-based audio clip index.
    pub audio: u32,
}

/// The container's trailing trigger section.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TriggerMap {
    /// Bindings in authoring order.
    pub frame_triggers: Vec<Trigger>,
    /// Loop flag carried by the format. Absent in older files, defaulting to
    /// `true`. Playback currently always loops regardless of this value.
    #[serde(rename = "loop", default = "default_loop")]
    pub loop_playback: bool,
}

fn default_loop() -> bool {
    true
}

impl TriggerMap {
    /// Map with the given bindings and looping enabled.
    pub fn new(frame_triggers: Vec<Trigger>) -> Self {
        Self {
            frame_triggers,
            loop_playback: true,
        }
    }

    /// Iterate the triggers bound to `frame`.
    pub fn triggers_for(&self, frame: usize) -> impl Iterator<Item = &Trigger> {
        self.frame_triggers
            .iter()
            .filter(move |t| t.frame as usize == frame)
    }
}

impl Default for TriggerMap {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loop_defaults_to_true_when_absent() {
        let map: TriggerMap = serde_json::from_str(r#"{"frame_triggers":[]}"#).unwrap();
        assert!(map.loop_playback);
    }

    #[test]
    fn wire_names_are_stable() {
        let map = TriggerMap {
            frame_triggers: vec![Trigger { frame: 1, audio: 0 }],
            loop_playback: false,
        };
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(
            json,
            r#"{"frame_triggers":[{"frame":1,"audio":0}],"loop":false}"#
        );
    }

    #[test]
    fn triggers_for_returns_all_matches() {
        let map = TriggerMap::new(vec![
            Trigger { frame: 2, audio: 0 },
            Trigger { frame: 1, audio: 1 },
            Trigger { frame: 2, audio: 1 },
        ]);
        let on_2: Vec<_> = map.triggers_for(2).collect();
        assert_eq!(on_2.len(), 2);
        assert!(map.triggers_for(0).next().is_none());
    }
}
