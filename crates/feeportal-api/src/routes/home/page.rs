//! Home page rendering

use chrono::Datelike;

const FEATURES: [(&str, &str, &str); 3] = [
    ("📊", "Smart Administration", "Automate school operations with ease and transparency."),
    ("🎓", "Student-Centric", "Track student growth, academics, and attendance seamlessly."),
    ("💳", "Seamless Payments", "Integrate secure fee payments with multiple gateways."),
];

const STATS: [(&str, &str); 3] = [
    ("500+", "Schools Empowered"),
    ("1M+", "Students Impacted"),
    ("99%", "Client Satisfaction"),
];

pub async fn page_home(headers: axum::http::HeaderMap) -> axum::response::Html<String> {
    let features: String = FEATURES
        .iter()
        .map(|(icon, title, desc)| {
            format!(
                r#"<div class='p-8 bg-white rounded-2xl shadow-2xl border hover:shadow-xl transition'>
                    <div class='text-4xl mb-4'>{}</div>
                    <h3 class='text-xl font-semibold mb-2'>{}</h3>
                    <p class='text-gray-600'>{}</p>
                </div>"#,
                icon, title, desc
            )
        })
        .collect();

    let stats: String = STATS
        .iter()
        .map(|(value, label)| {
            format!(
                "<div><h3 class='text-4xl font-bold text-indigo-600'>{}</h3><p class='mt-2 text-gray-700'>{}</p></div>",
                value, label
            )
        })
        .collect();

    let inner_content = format!(
        r#"<div class='bg-white text-gray-900'>
        <section class='relative bg-gradient-to-r from-indigo-600 to-purple-600 text-white rounded-3xl'>
            <div class='max-w-7xl mx-auto px-6 py-24'>
                <h1 class='text-4xl md:text-6xl font-extrabold leading-tight'>
                    Empowering Education with <span class='text-yellow-300'>Edviron</span>
                </h1>
                <p class='mt-6 text-lg md:text-xl text-gray-100'>
                    Transforming schools and institutions with powerful digital solutions.
                    Manage, grow, and succeed, all in one platform.
                </p>
                <div class='mt-8 flex gap-4'>
                    <a href='/paymentform' class='px-6 py-3 bg-yellow-400 text-black font-semibold rounded-lg shadow-md hover:bg-yellow-300'>Get Started</a>
                    <a href='#about' class='px-6 py-3 bg-white/20 border border-white text-white font-semibold rounded-lg hover:bg-white/30'>Learn More</a>
                </div>
            </div>
        </section>
        <section class='max-w-7xl mx-auto px-6 py-20'>
            <h2 class='text-3xl font-bold text-center mb-12'>Why Choose Edviron?</h2>
            <div class='grid md:grid-cols-3 gap-8'>{}</div>
        </section>
        <section id='about' class='bg-gray-50 py-20 px-6'>
            <div class='max-w-5xl mx-auto text-center'>
                <h2 class='text-3xl font-bold mb-6'>About Edviron</h2>
                <p class='text-lg text-gray-700 leading-relaxed'>
                    Edviron is revolutionizing the way schools operate by providing a
                    one-stop digital ecosystem. From fee management to learning tools,
                    Edviron ensures a future-ready education system for every child and
                    every institution.
                </p>
            </div>
        </section>
        <section class='max-w-7xl mx-auto px-6 py-20 grid md:grid-cols-3 gap-8 text-center'>{}</section>
        <section class='bg-gradient-to-r from-indigo-600 to-purple-600 text-white py-16 rounded-3xl'>
            <div class='max-w-5xl mx-auto text-center'>
                <h2 class='text-3xl font-bold mb-4'>Ready to Transform Your Institution?</h2>
                <p class='mb-8 text-lg'>Join the Edviron revolution and digitize your school today.</p>
                <a href='/paymentform' class='px-8 py-3 bg-yellow-400 text-black font-semibold rounded-lg shadow-md hover:bg-yellow-300'>Get Started Now</a>
            </div>
        </section>
        <footer class='bg-gray-900 text-gray-400 py-8 rounded-3xl'>
            <div class='max-w-7xl mx-auto px-6 flex flex-col md:flex-row justify-between items-center'>
                <p>© {} Edviron. All rights reserved.</p>
                <div class='flex gap-4 mt-4 md:mt-0'>
                    <a href='#' class='hover:text-white'>Privacy</a>
                    <a href='#' class='hover:text-white'>Terms</a>
                    <a href='#' class='hover:text-white'>Contact</a>
                </div>
            </div>
        </footer>
        </div>"#,
        features,
        stats,
        chrono::Utc::now().year()
    );

    axum::response::Html(crate::page_response(&headers, "Home", "/", &inner_content))
}
