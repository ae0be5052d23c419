use serde::Serialize;

/// Structured guidance for a career label. Derived deterministically from
/// `(career, weak_subject)` and returned to the caller as-is; never stored.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Roadmap {
    pub career: String,
    pub description: String,
    pub skills: Vec<String>,
    pub courses: Vec<String>,
    pub internships: Vec<String>,
    pub timeline: String,
    pub salary_range: String,
    pub timetable: Timetable,
}

/// Fixed seven-day study plan. Monday and Wednesday carry the interpolated
/// study-hour count; the other days are static.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Timetable {
    #[serde(rename = "Monday")]
    pub monday: String,
    #[serde(rename = "Tuesday")]
    pub tuesday: String,
    #[serde(rename = "Wednesday")]
    pub wednesday: String,
    #[serde(rename = "Thursday")]
    pub thursday: String,
    #[serde(rename = "Friday")]
    pub friday: String,
    #[serde(rename = "Saturday")]
    pub saturday: String,
    #[serde(rename = "Sunday")]
    pub sunday: String,
}

struct Template {
    career: &'static str,
    description: &'static str,
    skills: &'static [&'static str],
    courses: &'static [&'static str],
    internships: &'static [&'static str],
    timeline: &'static str,
    salary_range: &'static str,
}

const TEMPLATES: &[Template] = &[
    Template {
        career: "Software Engineer",
        description: "Design and develop software applications and systems",
        skills: &["Python", "JavaScript", "SQL", "Git", "React", "Node.js"],
        courses: &[
            "CS50 Introduction to Computer Science",
            "Python for Everybody",
            "Full Stack Web Development",
        ],
        internships: &[
            "Software Development Intern at Tech Company",
            "Web Development Intern",
            "Data Science Intern",
        ],
        timeline: "6-12 months for basic skills, 2-3 years for proficiency",
        salary_range: "$60,000 - $150,000+",
    },
    Template {
        career: "Doctor",
        description: "Diagnose and treat medical conditions, provide patient care",
        skills: &[
            "Anatomy",
            "Physiology",
            "Medical Terminology",
            "Patient Care",
            "Diagnosis",
        ],
        courses: &["Pre-Medical Studies", "MCAT Preparation", "Medical School"],
        internships: &[
            "Hospital Volunteer",
            "Medical Research Intern",
            "Shadowing Program",
        ],
        timeline: "8+ years (4 years medical school + residency)",
        salary_range: "$200,000 - $400,000+",
    },
    Template {
        career: "Data Scientist",
        description: "Analyze complex data to help organizations make decisions",
        skills: &[
            "Python",
            "R",
            "Machine Learning",
            "Statistics",
            "SQL",
            "Data Visualization",
        ],
        courses: &[
            "Data Science Specialization",
            "Machine Learning Course",
            "Statistics and Probability",
        ],
        internships: &[
            "Data Analysis Intern",
            "Machine Learning Intern",
            "Business Intelligence Intern",
        ],
        timeline: "6-18 months for entry level, 2-4 years for senior",
        salary_range: "$70,000 - $180,000+",
    },
    Template {
        career: "Designer",
        description: "Create visual concepts and designs for various media",
        skills: &[
            "Adobe Creative Suite",
            "UI/UX Design",
            "Typography",
            "Color Theory",
            "Figma",
        ],
        courses: &[
            "Graphic Design Fundamentals",
            "UI/UX Design Course",
            "Digital Art",
        ],
        internships: &[
            "Graphic Design Intern",
            "UI/UX Intern",
            "Creative Agency Intern",
        ],
        timeline: "3-12 months for basic skills, 1-3 years for portfolio",
        salary_range: "$40,000 - $120,000+",
    },
    Template {
        career: "Manager",
        description: "Lead teams and manage business operations",
        skills: &[
            "Leadership",
            "Project Management",
            "Communication",
            "Strategic Planning",
            "Team Building",
        ],
        courses: &[
            "Business Administration",
            "Project Management Certification",
            "Leadership Development",
        ],
        internships: &[
            "Management Trainee",
            "Business Operations Intern",
            "Team Lead Intern",
        ],
        timeline: "2-5 years for management roles",
        salary_range: "$50,000 - $200,000+",
    },
    Template {
        career: "Artist",
        description: "Create visual arts and designs",
        skills: &["Drawing", "Painting", "Digital Art", "Sculpting"],
        courses: &["Art Fundamentals", "Digital Illustration", "Portfolio Building"],
        internships: &[
            "Gallery Intern",
            "Design Studio Assistant",
            "Freelance Artist",
        ],
        timeline: "1-3 years for professional portfolio",
        salary_range: "$30,000 - $100,000+",
    },
    Template {
        career: "Physicist",
        description: "Study physical phenomena and conduct research",
        skills: &[
            "Advanced Math",
            "Physics Principles",
            "Research Methods",
            "Lab Skills",
        ],
        courses: &["Quantum Mechanics", "Thermodynamics", "Advanced Physics"],
        internships: &[
            "Research Lab Intern",
            "NASA or Lab Placement",
            "Academic Research",
        ],
        timeline: "4-8 years (degree + grad school)",
        salary_range: "$80,000 - $150,000+",
    },
    Template {
        career: "Entrepreneur",
        description: "Start and run businesses",
        skills: &[
            "Business Planning",
            "Marketing",
            "Finance Management",
            "Networking",
        ],
        courses: &[
            "Entrepreneurship 101",
            "Business Strategy",
            "Startup Fundamentals",
        ],
        internships: &[
            "Startup Intern",
            "Venture Capital Assistant",
            "Business Development",
        ],
        timeline: "Varies, 1-5 years to launch",
        salary_range: "Varies greatly",
    },
    Template {
        career: "Engineer",
        description: "Design and build systems and structures",
        skills: &[
            "Engineering Principles",
            "CAD Software",
            "Problem Solving",
            "Project Management",
        ],
        courses: &[
            "Engineering Fundamentals",
            "Specialization Courses (e.g., Mechanical)",
            "CAD Training",
        ],
        internships: &["Engineering Intern", "R&D Placement", "Construction Site"],
        timeline: "4 years degree + 2-4 years experience",
        salary_range: "$70,000 - $140,000+",
    },
];

static FALLBACK: Template = Template {
    career: "",
    description: "Professional career path",
    skills: &["Core Skills", "Industry Knowledge", "Soft Skills"],
    courses: &["Relevant Coursework", "Professional Development"],
    internships: &["Industry Internships", "Professional Experience"],
    timeline: "Varies by field",
    salary_range: "Varies by location and experience",
};

/// Expands a career label into a full roadmap. Total over all labels: an
/// unknown label resolves to the generic fallback with the label echoed in
/// the `career` field, never an error.
pub fn generate(career: &str, weak_subject: bool) -> Roadmap {
    let template = TEMPLATES
        .iter()
        .find(|t| t.career == career)
        .unwrap_or(&FALLBACK);

    Roadmap {
        career: career.to_string(),
        description: template.description.to_string(),
        skills: template.skills.iter().map(|s| s.to_string()).collect(),
        courses: template.courses.iter().map(|s| s.to_string()).collect(),
        internships: template.internships.iter().map(|s| s.to_string()).collect(),
        timeline: template.timeline.to_string(),
        salary_range: template.salary_range.to_string(),
        timetable: timetable(weak_subject),
    }
}

pub fn known_careers() -> impl Iterator<Item = &'static str> {
    TEMPLATES.iter().map(|t| t.career)
}

fn timetable(weak_subject: bool) -> Timetable {
    let study_hours = if weak_subject { 3 } else { 2 };

    Timetable {
        monday: format!(
            "9AM-12PM: Study Core Subjects ({study_hours}h Math/Science if needed)\n1PM-3PM: Skill Practice\n4PM-6PM: Courses"
        ),
        tuesday: "9AM-12PM: Internship Prep\n1PM-4PM: Project Work\n5PM-7PM: Review Interests"
            .to_string(),
        wednesday: format!(
            "9AM-1PM: Focused Study ({study_hours}h on weak areas)\n2PM-5PM: Online Courses\n6PM-8PM: Rest/Reflection"
        ),
        thursday: "9AM-12PM: Skill Building\n1PM-3PM: Networking\n4PM-6PM: Goal Review".to_string(),
        friday: "9AM-11AM: Weekly Assessment\n12PM-3PM: Free Time for Passions\n4PM-6PM: Update Progress"
            .to_string(),
        saturday: "10AM-2PM: Hands-on Projects\n3PM-5PM: Mentorship/Reading".to_string(),
        sunday: "Rest Day - Light Review".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_known_career_has_a_full_template() {
        let careers: Vec<&str> = known_careers().collect();
        assert_eq!(careers.len(), 9);

        for career in careers {
            let roadmap = generate(career, false);
            assert_eq!(roadmap.career, career);
            assert!(!roadmap.skills.is_empty());
            assert!(!roadmap.courses.is_empty());
            assert!(!roadmap.internships.is_empty());
            assert!(!roadmap.timeline.is_empty());
            assert!(!roadmap.salary_range.is_empty());
        }
    }

    #[test]
    fn unknown_career_falls_back_without_failing() {
        let roadmap = generate("NotARealCareer", true);
        assert_eq!(roadmap.career, "NotARealCareer");
        assert_eq!(roadmap.description, "Professional career path");
        assert!(!roadmap.skills.is_empty());
        assert!(roadmap.timetable.monday.contains("3h"));
    }

    #[test]
    fn weak_subject_raises_study_hours() {
        let normal = generate("Doctor", false);
        assert!(normal.timetable.monday.contains("2h"));
        assert!(normal.timetable.wednesday.contains("2h"));

        let weak = generate("Doctor", true);
        assert!(weak.timetable.monday.contains("3h"));
        assert!(weak.timetable.wednesday.contains("3h"));

        // Only Monday and Wednesday are personalized.
        assert_eq!(normal.timetable.tuesday, weak.timetable.tuesday);
        assert_eq!(normal.timetable.sunday, weak.timetable.sunday);
    }

    #[test]
    fn timetable_serializes_with_day_names() {
        let roadmap = generate("Artist", false);
        let json = serde_json::to_value(&roadmap).unwrap();
        let timetable = json.get("timetable").unwrap();
        for day in [
            "Monday",
            "Tuesday",
            "Wednesday",
            "Thursday",
            "Friday",
            "Saturday",
            "Sunday",
        ] {
            assert!(timetable.get(day).is_some(), "missing {day}");
        }
        assert!(json.get("salary_range").is_some());
    }
}
