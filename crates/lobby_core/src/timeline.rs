/// Minor bars drawn between two decade labels.
pub const TICKS_PER_DECADE: usize = 9;

/// Leading ticks in each gap that narrow layouts hide.
const HIDDEN_TICKS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineMark {
    /// Selectable decade label.
    Decade(i32),
    /// Unlabelled year bar.
    Tick { hidden: bool },
}

/// The selectable decade anchors shown on the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeline {
    start: i32,
    end: i32,
    step: i32,
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new(1930, 1990, 10)
    }
}

impl Timeline {
    /// A zero or negative `step` is treated as 1; `end` below `start` yields a
    /// single-decade timeline.
    pub fn new(start: i32, end: i32, step: i32) -> Self {
        Self {
            start,
            end: end.max(start),
            step: step.max(1),
        }
    }

    pub fn start(&self) -> i32 {
        self.start
    }

    pub fn end(&self) -> i32 {
        self.end
    }

    pub fn step(&self) -> i32 {
        self.step
    }

    pub fn decades(&self) -> impl Iterator<Item = i32> + '_ {
        (self.start..=self.end).step_by(self.step as usize)
    }

    pub fn contains(&self, year: i32) -> bool {
        year >= self.start && year <= self.end && (year - self.start) % self.step == 0
    }

    pub fn marks(&self) -> Vec<TimelineMark> {
        let decades: Vec<i32> = self.decades().collect();
        let mut marks = Vec::with_capacity(decades.len() * (TICKS_PER_DECADE + 1));
        for (i, year) in decades.iter().enumerate() {
            marks.push(TimelineMark::Decade(*year));
            if i + 1 < decades.len() {
                marks.extend((1..=TICKS_PER_DECADE).map(|tick| TimelineMark::Tick {
                    hidden: tick <= HIDDEN_TICKS,
                }));
            }
        }
        marks
    }

    /// Heading for the gallery anchored at `year`.
    pub fn gallery_title(year: i32) -> String {
        format!("Lobby Cards: {}-{}", year - 9, year)
    }
}
