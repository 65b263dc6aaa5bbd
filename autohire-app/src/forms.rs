//! Guided-input forms shown when a command is issued without its
//! required arguments. Submitting a form synthesizes the equivalent
//! fully-qualified command string and feeds the same invoke path.

/// Fields of the outreach form. Recipient and email are required.
#[derive(Debug, Clone, Default)]
pub struct OutreachForm {
    pub recipient: String,
    pub email: String,
    pub company: String,
    pub role: String,
    pub context: String,
}

impl OutreachForm {
    pub fn synthesized_command(&self) -> String {
        let company = if self.company.is_empty() { "company" } else { &self.company };
        format!("/outreach {} {} {}", self.recipient, self.email, company)
    }

    pub fn prompt(&self) -> String {
        format!(
            "Send a personalized cold outreach email to {} at {}. They work at {} as {}. \
             Context: {}",
            self.recipient, self.email, self.company, self.role, self.context
        )
    }
}

/// Fields of the interview scheduling form. Recruiter email and
/// thread context are required.
#[derive(Debug, Clone, Default)]
pub struct ScheduleForm {
    pub recruiter_email: String,
    pub thread_context: String,
    pub availability: String,
}

impl ScheduleForm {
    pub fn synthesized_command(&self) -> String {
        format!("/schedule {} {}", self.recruiter_email, self.thread_context)
    }

    pub fn prompt(&self) -> String {
        let availability = if self.availability.is_empty() {
            "Flexible, any weekday 9am-5pm"
        } else {
            &self.availability
        };
        format!(
            "Check email thread with {} regarding: {}. My availability: {}. Negotiate interview \
             time, confirm the slot, and create a Google Calendar event.",
            self.recruiter_email, self.thread_context, availability
        )
    }
}

/// Fields of the application crafting form. Both are required.
#[derive(Debug, Clone, Default)]
pub struct CraftForm {
    pub company: String,
    pub role: String,
}

impl CraftForm {
    pub fn synthesized_command(&self) -> String {
        format!("/craft {} {}", self.company, self.role)
    }

    pub fn prompt(&self) -> String {
        autohire_core::dispatch::craft_prompt(&self.company, &self.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outreach_form_defaults_company_placeholder() {
        let form = OutreachForm {
            recipient: "Jane".to_string(),
            email: "jane@x.com".to_string(),
            ..Default::default()
        };
        assert_eq!(form.synthesized_command(), "/outreach Jane jane@x.com company");
    }

    #[test]
    fn schedule_form_defaults_availability() {
        let form = ScheduleForm {
            recruiter_email: "r@x.com".to_string(),
            thread_context: "Senior role".to_string(),
            availability: String::new(),
        };
        assert!(form.prompt().contains("Flexible, any weekday 9am-5pm"));
        assert_eq!(form.synthesized_command(), "/schedule r@x.com Senior role");
    }

    #[test]
    fn craft_form_builds_crafter_prompt() {
        let form = CraftForm {
            company: "Stripe".to_string(),
            role: "Staff Engineer".to_string(),
        };
        assert!(form.prompt().contains("Staff Engineer position at Stripe"));
    }
}
