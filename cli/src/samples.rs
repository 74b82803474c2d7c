//! Texts shown by the demo screen.

use readmore_engine::{TrimMode, TrimPolicy};

/// How a sample departs from the configured policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Configured,
    Lines(usize),
    Length(usize),
}

#[derive(Debug, Clone, Copy)]
pub struct Sample {
    pub title: &'static str,
    pub text: &'static str,
    pub variant: Variant,
}

impl Sample {
    #[must_use]
    pub fn policy(&self, base: &TrimPolicy) -> TrimPolicy {
        match self.variant {
            Variant::Configured => base.clone(),
            Variant::Lines(max_lines) => base
                .clone()
                .with_mode(TrimMode::Lines)
                .with_max_lines(max_lines),
            Variant::Length(max_length) => base
                .clone()
                .with_mode(TrimMode::Length)
                .with_max_length(max_length),
        }
    }
}

const LOREM_IPSUM: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. Integer \
nec odio. Praesent libero. Sed cursus ante dapibus diam. Sed nisi. Nulla quis sem at nibh \
elementum imperdiet. Duis sagittis ipsum. Praesent mauris. Fusce nec tellus sed augue semper \
porta. Mauris massa. Vestibulum lacinia arcu eget nulla. Class aptent taciti sociosqu ad litora \
torquent per conubia nostra, per inceptos himenaeos.";

const LOREM_IPSUM_2: &str = "Curabitur sodales ligula in libero. Sed dignissim lacinia nunc. \
Curabitur tortor. Pellentesque nibh. Aenean quam. In scelerisque sem at dolor. Maecenas mattis. \
Sed convallis tristique sem. Proin ut ligula vel nunc egestas porttitor. Morbi lectus risus, \
iaculis vel, suscipit quis, luctus non, massa.\n\nFusce ac turpis quis ligula lacinia aliquet. \
Mauris ipsum. Nulla metus metus, ullamcorper vel, tincidunt sed, euismod in, nibh.";

const LOREM_IPSUM_3: &str = "Quisque volutpat condimentum velit. Class aptent taciti sociosqu \
ad litora torquent per conubia nostra, per inceptos himenaeos. Nam nec ante. Sed lacinia, urna \
non tincidunt mattis, tortor neque adipiscing diam, a cursus ipsum ante quis turpis. Nulla \
facilisi. Ut fringilla. Suspendisse potenti. Nunc feugiat mi a tellus consequat imperdiet. \
Vestibulum sapien. Proin quam. Etiam ultrices.";

const ONE_LINE_TEXT: &str = "A single short line never needs trimming.";

pub const SAMPLES: [Sample; 4] = [
    Sample {
        title: "Lorem ipsum",
        text: LOREM_IPSUM,
        variant: Variant::Configured,
    },
    Sample {
        title: "Paragraphs, three lines",
        text: LOREM_IPSUM_2,
        variant: Variant::Lines(3),
    },
    Sample {
        title: "By length",
        text: LOREM_IPSUM_3,
        variant: Variant::Length(120),
    },
    Sample {
        title: "One line",
        text: ONE_LINE_TEXT,
        variant: Variant::Configured,
    },
];

#[cfg(test)]
mod tests {
    use readmore_engine::{TrimMode, TrimPolicy};

    use super::{SAMPLES, Variant};

    #[test]
    fn variants_override_only_their_knobs() {
        let base = TrimPolicy::default().with_collapsed_text("More");
        let lines = SAMPLES[1].policy(&base);
        assert_eq!(lines.mode(), TrimMode::Lines);
        assert_eq!(lines.max_lines(), 3);
        assert_eq!(lines.collapsed_text(), "More");

        let length = SAMPLES[2].policy(&base);
        assert_eq!(length.mode(), TrimMode::Length);
        assert_eq!(length.max_length(), 120);
    }

    #[test]
    fn long_samples_exceed_the_length_budget() {
        for sample in SAMPLES.iter().filter(|s| s.variant != Variant::Configured) {
            assert!(sample.text.chars().count() > 240, "{}", sample.title);
        }
        assert!(SAMPLES[3].text.chars().count() < 60);
    }
}
