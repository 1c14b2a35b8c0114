//! Scripted transcripts.
//!
//! Git, npm, ps and curl output is canned text. [`Scripts`] holds it as data
//! so a terminal can be built with different transcripts; the default set
//! is bundled from `assets/text`.

use chrono::{DateTime, Duration, TimeZone};

use crate::config::{CURL_STREAM_HOST, PS_TEXT, git_text, npm_text, stream_text};
use crate::utils::format_timestamp;

/// Canned transcripts used by the evaluator and the streaming simulator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scripts {
    pub git_status: String,
    /// May contain `{today}`, `{yesterday}` and `{two_days_ago}`
    pub git_log: String,
    pub git_diff: String,
    pub npm_list: String,
    pub npm_install: String,
    pub npm_start: String,
    pub npm_test: String,
    /// May contain `{user}`
    pub ps: String,
    pub stream_npm_install: String,
    pub stream_npm_start: String,
    pub stream_npm_test: String,
    /// May contain `{url}` and `{date}`
    pub stream_curl: String,
}

impl Default for Scripts {
    fn default() -> Self {
        Self {
            git_status: git_text::STATUS.to_string(),
            git_log: git_text::LOG.to_string(),
            git_diff: git_text::DIFF.to_string(),
            npm_list: npm_text::LIST.to_string(),
            npm_install: npm_text::INSTALL.to_string(),
            npm_start: npm_text::START.to_string(),
            npm_test: npm_text::TEST.to_string(),
            ps: PS_TEXT.to_string(),
            stream_npm_install: stream_text::NPM_INSTALL.to_string(),
            stream_npm_start: stream_text::NPM_START.to_string(),
            stream_npm_test: stream_text::NPM_TEST.to_string(),
            stream_curl: stream_text::CURL_EXAMPLE.to_string(),
        }
    }
}

impl Scripts {
    /// `git log`, dated today, yesterday and the day before.
    pub fn git_log<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Vec<String>
    where
        Tz::Offset: std::fmt::Display,
    {
        let day = Duration::days(1);
        let yesterday = now.clone() - day;
        let two_days_ago = now.clone() - day * 2;
        to_lines(
            &self
                .git_log
                .replace("{today}", &format_timestamp(now))
                .replace("{yesterday}", &format_timestamp(&yesterday))
                .replace("{two_days_ago}", &format_timestamp(&two_days_ago)),
        )
    }

    /// `ps` process table owned by `user`.
    pub fn ps(&self, user: &str) -> Vec<String> {
        to_lines(&self.ps.replace("{user}", user))
    }

    /// Lines revealed for a streaming command.
    pub fn stream_lines<Tz: TimeZone>(
        &self,
        trigger: &StreamTrigger,
        now: &DateTime<Tz>,
    ) -> Vec<String>
    where
        Tz::Offset: std::fmt::Display,
    {
        match trigger {
            StreamTrigger::NpmInstall => to_lines(&self.stream_npm_install),
            StreamTrigger::NpmStart => to_lines(&self.stream_npm_start),
            StreamTrigger::NpmTest => to_lines(&self.stream_npm_test),
            StreamTrigger::Curl(url) => to_lines(
                &self
                    .stream_curl
                    .replace("{url}", url)
                    .replace("{date}", &format_timestamp(now)),
            ),
        }
    }
}

/// Split a transcript into output lines, ignoring the final newline.
pub fn to_lines(text: &str) -> Vec<String> {
    text.lines().map(str::to_string).collect()
}

// =============================================================================
// Streaming Triggers
// =============================================================================

/// Commands whose output is revealed incrementally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamTrigger {
    NpmInstall,
    NpmStart,
    NpmTest,
    /// `curl` against the example host
    Curl(String),
}

impl StreamTrigger {
    /// Recognize a streaming command from its name and arguments.
    pub fn detect(name: &str, args: &[String]) -> Option<Self> {
        let first = args.first()?;
        match (name, first.as_str()) {
            ("npm", "install") => Some(Self::NpmInstall),
            ("npm", "start") => Some(Self::NpmStart),
            ("npm", "test") => Some(Self::NpmTest),
            ("curl", url) if url.contains(CURL_STREAM_HOST) => Some(Self::Curl(url.to_string())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn args(strs: &[&str]) -> Vec<String> {
        strs.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_detect() {
        assert_eq!(
            StreamTrigger::detect("npm", &args(&["install"])),
            Some(StreamTrigger::NpmInstall)
        );
        assert_eq!(
            StreamTrigger::detect("npm", &args(&["test", "--watch"])),
            Some(StreamTrigger::NpmTest)
        );
        assert_eq!(
            StreamTrigger::detect("curl", &args(&["https://example.com/a"])),
            Some(StreamTrigger::Curl("https://example.com/a".into()))
        );
        assert_eq!(StreamTrigger::detect("npm", &args(&["list"])), None);
        assert_eq!(StreamTrigger::detect("npm", &[]), None);
        assert_eq!(StreamTrigger::detect("curl", &args(&["google.com"])), None);
        assert_eq!(StreamTrigger::detect("NPM", &args(&["install"])), None);
    }

    #[test]
    fn test_stream_script_lengths() {
        let scripts = Scripts::default();
        let now = Utc::now();
        assert_eq!(
            scripts.stream_lines(&StreamTrigger::NpmInstall, &now).len(),
            27
        );
        assert_eq!(scripts.stream_lines(&StreamTrigger::NpmStart, &now).len(), 22);
        assert_eq!(scripts.stream_lines(&StreamTrigger::NpmTest, &now).len(), 23);
    }

    #[test]
    fn test_curl_stream_templated() {
        let scripts = Scripts::default();
        let now = Utc.with_ymd_and_hms(2025, 3, 7, 9, 0, 0).unwrap();
        let lines = scripts.stream_lines(&StreamTrigger::Curl("example.com".into()), &now);
        assert_eq!(lines[0], "curl example.com");
        assert!(lines.iter().any(|l| l == "Date: 3/7/2025, 9:00:00 AM"));
        assert_eq!(lines.len(), 34);
        assert!(lines.iter().all(|l| !l.contains("{url}") && !l.contains("{date}")));
    }

    #[test]
    fn test_git_log_dates() {
        let scripts = Scripts::default();
        let now = Utc.with_ymd_and_hms(2025, 3, 7, 16, 5, 9).unwrap();
        let dates: Vec<_> = scripts
            .git_log(&now)
            .into_iter()
            .filter(|l| l.starts_with("Date:"))
            .collect();
        assert_eq!(
            dates,
            vec![
                "Date:   3/7/2025, 4:05:09 PM",
                "Date:   3/6/2025, 4:05:09 PM",
                "Date:   3/5/2025, 4:05:09 PM",
            ]
        );
    }

    #[test]
    fn test_ps_user() {
        let lines = Scripts::default().ps("ada");
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("1234  ada"));
    }
}
