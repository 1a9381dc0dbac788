use crate::domain::quiz::QuizAnswers;

// Renders the cover prompt from the quiz. The output is deterministic for a
// given set of answers.
pub fn cover_prompt(answers: &QuizAnswers) -> String {
    let a = answers.trimmed();
    format!(
        "Create a vintage 1980s superhero comic book cover starring the person in the \
         input image, drawn as a {gender} hero. Keep the face exactly as it appears in \
         the photo: same facial structure, skin tone, eyes, hair and expression, \
         instantly recognizable. The hero grew up in {city} and wields the power of \
         {superpower}. Their greatest fear, {fear}, looms in the background as a \
         shadowy threat. They are driven by the memory of {memory}, and their signature \
         strength, {strength}, shows in a bold, heroic pose. The scene should express \
         the message \"{lesson}\". Use bold ink outlines, halftone dot shading, saturated \
         primary colors and dramatic lighting in the style of classic 1980s comics. Do \
         not include any text, titles, speech bubbles, logos or watermarks anywhere in \
         the image.",
        gender = gender_phrase(&a.gender),
        city = a.city,
        superpower = a.superpower.to_lowercase(),
        fear = a.fear,
        memory = a.memory,
        strength = a.strength,
        lesson = a.lesson,
    )
}

fn gender_phrase(gender: &str) -> &'static str {
    match gender.to_ascii_lowercase().as_str() {
        "man" | "male" => "male",
        "woman" | "female" => "female",
        _ => "gender-neutral",
    }
}
