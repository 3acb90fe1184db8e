// Endings that mark where genuine article content stops: bylines, photo
// credits, fact boxes and Infomedia footers. Order matters, each marker is
// applied to whatever the previous markers left behind.
pub const DEFAULT_MARKERS: &[&str] = &[
    "LINEA SØGAARD-LIDELL EU-parlamentariker, Venstre.",
    " I LLU ST RATION: ",
    " Kilde: Beskæftigelsesministeriet. ,",
    " dorte.boddum@finans.dk",
    " mie.l.raatz@jp.dk ",
    " segj@information.dk",
    ". (arkivfoto)",
    " FOTO: ",
    " frederikke.traeholt@jp.dk",
    ". Ritzau.",
    "Camilla Gregersen Dansk Magisterforening.",
    " makr@information.dk",
    "MICHELLA MEIER-MORSI. , Michella Meier-Morsi og Mark Morsi med deres fem børn. Privatfoto",
    " (ARKIV)",
    " loka@berlingske.dk , ",
    " jonas.proschold@pol.dk",
    "SIDE 8-9. FOTO: ",
    " elisabet.svane@pol.dk ,",
    " ILLUSTRATION: ",
    "Kilder: EU-",
    "Kilder: Folketingets",
    "Kilde: \\ ",
    "Kilder: Danmarks Statistik, Politiken, Ritzau. ",
    " sonne@information.dk ",
    " , laura.nissen@jp.dk",
    " PR-foto",
    "Ark kivfoto: ",
    "anders.m.bruun@finans.dk Illustration: ",
    "winther@k.dk Fakta:",
    "FOTO: PER",
    "Fakta: FAKTA ",
    "Fejl og Fakta 28.10.2021:",
    "Fakta: Hvad mener du? Send ",
    " ELSE JOHANNESSEN,",
    " Fakta: BLÅ BOG ",
    "Se alle 140 underskrivere på information.dk/ deltag.",
    " (Foto: ",
    " (© COLORBOX) ",
    "hejs@berlingske.dk tbre@berlingske.dk",
    " KILDER: ",
    " information. dk/deltag ",
    " Arkivfoto: ",
    "Se klippet fra samtalen mellem Alex Vanopslagh og Søren Pind her.",
    "LÆS OGSÅ KRONIKKEN SIDE ",
    "PRIVAT",
    " Berlingske Grafik: ",
    "/ ritzau/",
    " Læs mere her. , FOLD UD ",
    "Alt mediemateriale fra Infomedia er ophavsretligt beskyttet.",
    "/Ritzau/",
    " Fold sammen Læs mere ",
    "/ritzau/",
    " Foto: ",
];
