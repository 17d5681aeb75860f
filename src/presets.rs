//! presets.rs
//!
//! Example emails the user can load into the form with one keystroke.
//! Static display data only; presets go through the same submit path as
//! hand-typed input.

pub struct ExamplePreset {
    pub title: &'static str,
    pub email_text: &'static str,
    pub subject: &'static str,
    pub sender: &'static str,
    pub phishing: bool,
}

pub const EXAMPLES: &[ExamplePreset] = &[
    ExamplePreset {
        title: "Prize Scam",
        email_text: "Click here to claim your prize! You've won $1000!",
        subject: "Congratulations Winner!",
        sender: "winner@suspicious-site.com",
        phishing: true,
    },
    ExamplePreset {
        title: "Account Alert",
        email_text: "Your account has been compromised. Click link to secure it immediately.",
        subject: "Urgent: Account Security Alert",
        sender: "security@fake-bank.net",
        phishing: true,
    },
    ExamplePreset {
        title: "Urgent Offer",
        email_text: "ACT NOW! Limited time offer expires in 24 hours!",
        subject: "URGENT OFFER",
        sender: "promotions@spammail.com",
        phishing: true,
    },
    ExamplePreset {
        title: "Meeting Reminder",
        email_text: "Meeting reminder for tomorrow at 2 PM in conference room A",
        subject: "Team Meeting Tomorrow",
        sender: "sarah.johnson@company.com",
        phishing: false,
    },
    ExamplePreset {
        title: "Work Report",
        email_text: "Please review the attached quarterly report and provide feedback",
        subject: "Q3 Report Review",
        sender: "finance@company.com",
        phishing: false,
    },
    ExamplePreset {
        title: "Team Lunch",
        email_text: "Don't forget about the team lunch tomorrow at 12:30 PM",
        subject: "Team Lunch Reminder",
        sender: "hr@company.com",
        phishing: false,
    },
];
