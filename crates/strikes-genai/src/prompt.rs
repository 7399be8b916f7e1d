use crate::generator::Purpose;

/// Build the Dutch prompt for `purpose` about `name`.
pub fn build(purpose: Purpose, name: &str) -> String {
    match purpose {
        Purpose::StrikeReason => format!(
            "Genereer een grappige, korte, droge reden (in het Nederlands) waarom {name} bij \
             Smash Studios zojuist een 'strike' heeft gekregen. Maak het absurd maar \
             studio-gerelateerd (bijv. 'Koffiebeker niet in de vaatwasser', 'Te veel naar de \
             muur gestaard', 'Muisklikken waren te luid'). Maximaal 10 woorden."
        ),
        Purpose::TreatCelebration => format!(
            "Roep enthousiast uit (in het Nederlands) dat {name} 3 strikes heeft en nu moet \
             trakteren! Maak het een beetje plagerig en vrolijk. Noem iets lekkers zoals \
             worstenbroodjes, vlaai of donuts. Kort bericht."
        ),
    }
}
